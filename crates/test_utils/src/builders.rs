//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{Money, PartyId, Rate};
use domain_loan::{LoanAccount, LoanTerms, ProductRules};

use crate::fixtures::{MoneyFixtures, RateFixtures, TemporalFixtures};

/// Builder for constructing test loan accounts
pub struct TestLoanBuilder {
    borrower: PartyId,
    principal: Money,
    tenure_months: u32,
    annual_rate: Rate,
    origination_date: NaiveDate,
    rules: ProductRules,
}

impl Default for TestLoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLoanBuilder {
    /// Creates a new builder with the reference loan's defaults
    pub fn new() -> Self {
        Self {
            borrower: PartyId::new(),
            principal: MoneyFixtures::inr_principal(),
            tenure_months: 12,
            annual_rate: RateFixtures::ten_percent(),
            origination_date: TemporalFixtures::origination(),
            rules: ProductRules::default(),
        }
    }

    /// Sets the borrower
    pub fn with_borrower(mut self, borrower: PartyId) -> Self {
        self.borrower = borrower;
        self
    }

    /// Sets the principal
    pub fn with_principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the tenure in months
    pub fn with_tenure_months(mut self, tenure_months: u32) -> Self {
        self.tenure_months = tenure_months;
        self
    }

    /// Sets the annual rate from a percentage
    pub fn with_annual_rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Rate::from_percentage(percent);
        self
    }

    /// Sets the origination date
    pub fn with_origination_date(mut self, date: NaiveDate) -> Self {
        self.origination_date = date;
        self
    }

    /// Sets the product rules applied at open time
    pub fn with_rules(mut self, rules: ProductRules) -> Self {
        self.rules = rules;
        self
    }

    /// Builds the terms without opening an account
    pub fn build_terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.principal,
            self.tenure_months,
            self.annual_rate,
            self.origination_date,
        )
        .expect("builder produced invalid terms")
    }

    /// Builds a PENDING loan account
    pub fn build(self) -> LoanAccount {
        let terms = self.build_terms();
        LoanAccount::open(self.borrower, terms, &self.rules)
            .expect("builder produced an unopenable loan")
    }

    /// Builds an APPROVED loan account with its schedule generated
    pub fn build_approved(self) -> LoanAccount {
        let mut loan = self.build();
        loan.approve(TemporalFixtures::approval_time())
            .expect("builder loan could not be approved");
        loan
    }

    /// Builds an APPROVED loan with the first `payments` installments paid
    pub fn build_with_payments(self, payments: u32) -> LoanAccount {
        let mut loan = self.build_approved();
        for k in 1..=payments {
            loan.record_payment(TemporalFixtures::payment_time(k))
                .expect("builder loan could not record payment");
        }
        loan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_loan::LoanStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_build_is_pending() {
        let loan = TestLoanBuilder::new().build();
        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.terms.principal(), MoneyFixtures::inr_principal());
    }

    #[test]
    fn test_build_approved_has_schedule() {
        let loan = TestLoanBuilder::new().build_approved();
        assert_eq!(loan.status, LoanStatus::Approved);
        assert_eq!(loan.schedule.len(), 12);
    }

    #[test]
    fn test_build_with_payments() {
        let loan = TestLoanBuilder::new().build_with_payments(5);
        assert_eq!(loan.payments_made, 5);
        assert_eq!(loan.next_payment().unwrap().installment_number, 6);
    }

    #[test]
    fn test_build_with_all_payments_is_repaid() {
        let loan = TestLoanBuilder::new().build_with_payments(12);
        assert_eq!(loan.status, LoanStatus::Repaid);
    }

    #[test]
    fn test_customized_terms() {
        let loan = TestLoanBuilder::new()
            .with_principal(Money::new(dec!(50000), core_kernel::Currency::INR))
            .with_tenure_months(24)
            .with_annual_rate_percent(dec!(12.5))
            .build_approved();

        assert_eq!(loan.schedule.len(), 24);
        assert_eq!(loan.terms.annual_rate().as_percentage(), dec!(12.5));
    }
}
