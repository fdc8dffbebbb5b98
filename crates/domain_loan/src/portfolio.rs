//! Portfolio aggregation and credit policy
//!
//! Dashboard-level totals across a borrower's loans, and the injected credit
//! ceiling that caps how much may be pending or outstanding at once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::{CoreError, Currency, Money};

use crate::account::{LoanAccount, LoanStatus};
use crate::error::LoanError;

/// The borrower's credit ceiling
///
/// Injected configuration, not a constant: the observed product caps every
/// borrower at ₹100,000, but limits are per-product (and eventually
/// per-tier) policy.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditPolicy {
    pub credit_limit: Money,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            credit_limit: Money::new(dec!(100000), Currency::INR),
        }
    }
}

/// Environment representation of the credit policy (`LENDING_*` variables)
#[derive(Debug, Deserialize)]
struct RawCreditPolicy {
    credit_limit: Decimal,
    #[serde(default)]
    currency: Currency,
}

impl CreditPolicy {
    pub fn new(credit_limit: Money) -> Self {
        Self { credit_limit }
    }

    /// Loads the policy from `LENDING_CREDIT_LIMIT` / `LENDING_CURRENCY`
    pub fn from_env() -> Result<Self, CoreError> {
        let raw: RawCreditPolicy = config::Config::builder()
            .add_source(config::Environment::with_prefix("LENDING"))
            .build()
            .map_err(|e| CoreError::configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        Ok(Self::new(Money::new(raw.credit_limit, raw.currency)))
    }

    /// Principal counted against the limit: loans awaiting a decision plus
    /// loans actively repaying
    pub fn used_limit(&self, loans: &[LoanAccount]) -> Money {
        loans
            .iter()
            .filter(|loan| {
                matches!(loan.status, LoanStatus::Pending | LoanStatus::Approved)
            })
            .fold(Money::zero(self.credit_limit.currency()), |acc, loan| {
                acc + loan.terms.principal()
            })
    }

    /// Credit still available under the ceiling, floored at zero
    pub fn available_limit(&self, used: Money) -> Money {
        (self.credit_limit - used).max(Money::zero(self.credit_limit.currency()))
    }

    /// Checks whether a new application fits under the ceiling
    ///
    /// # Errors
    ///
    /// `LoanError::CreditLimitExceeded` when the requested principal plus
    /// pending/approved principal would pass the limit.
    pub fn check_application(
        &self,
        existing: &[LoanAccount],
        requested: Money,
    ) -> Result<(), LoanError> {
        let outstanding = self.used_limit(existing);
        let total = outstanding.checked_add(&requested)?;

        if total.checked_sub(&self.credit_limit)?.is_positive() {
            return Err(LoanError::CreditLimitExceeded {
                requested,
                outstanding,
                limit: self.credit_limit,
            });
        }
        Ok(())
    }
}

/// Dashboard totals over a set of loan accounts
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioTotals {
    pub total_loans: u32,
    pub active_loans: u32,
    pub pending_loans: u32,
    pub completed_loans: u32,
    /// EMI × remaining installments, summed over active loans
    pub total_outstanding: Money,
    /// Principal ever disbursed (active plus fully repaid loans)
    pub total_borrowed: Money,
    /// Principal counted against the credit ceiling
    pub used_limit: Money,
    pub available_limit: Money,
}

/// Computes the dashboard totals for a borrower's loans
pub fn portfolio_totals(loans: &[LoanAccount], policy: &CreditPolicy) -> PortfolioTotals {
    let currency = policy.credit_limit.currency();

    let mut active_loans = 0u32;
    let mut pending_loans = 0u32;
    let mut completed_loans = 0u32;
    let mut total_outstanding = Money::zero(currency);
    let mut total_borrowed = Money::zero(currency);

    for loan in loans {
        match loan.status {
            LoanStatus::Approved => {
                active_loans += 1;
                let remaining = Decimal::from(loan.payments_remaining());
                total_outstanding =
                    total_outstanding + loan.quote.monthly_installment.multiply(remaining);
                total_borrowed = total_borrowed + loan.terms.principal();
            }
            LoanStatus::Pending => pending_loans += 1,
            LoanStatus::Repaid => {
                completed_loans += 1;
                total_borrowed = total_borrowed + loan.terms.principal();
            }
            LoanStatus::Rejected | LoanStatus::Foreclosed => {}
        }
    }

    let used_limit = policy.used_limit(loans);
    let available_limit = policy.available_limit(used_limit);

    PortfolioTotals {
        total_loans: loans.len() as u32,
        active_loans,
        pending_loans,
        completed_loans,
        total_outstanding,
        total_borrowed,
        used_limit,
        available_limit,
    }
}
