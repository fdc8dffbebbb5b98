//! Loan terms and product rules
//!
//! `LoanTerms` are the immutable inputs of the amortization engine; they are
//! validated on construction and never change for the life of a loan.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate};

use crate::error::LoanError;

/// Immutable inputs of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal: Money,
    tenure_months: u32,
    annual_rate: Rate,
    origination_date: NaiveDate,
}

impl LoanTerms {
    /// Creates validated loan terms
    ///
    /// The principal is rounded to minor-unit precision on the way in, so
    /// every downstream balance stays exactly representable in currency
    /// units.
    ///
    /// # Errors
    ///
    /// `LoanError::InvalidTerms` when the principal is not positive, the
    /// tenure is zero, or the rate is negative.
    pub fn new(
        principal: Money,
        tenure_months: u32,
        annual_rate: Rate,
        origination_date: NaiveDate,
    ) -> Result<Self, LoanError> {
        if !principal.is_positive() {
            return Err(LoanError::InvalidTerms(format!(
                "principal must be positive, got {}",
                principal
            )));
        }
        if tenure_months == 0 {
            return Err(LoanError::InvalidTerms(
                "tenure must be at least one month".to_string(),
            ));
        }
        if annual_rate.is_negative() {
            return Err(LoanError::InvalidTerms(format!(
                "interest rate must not be negative, got {}",
                annual_rate
            )));
        }

        Ok(Self {
            principal: principal.round_half_up(),
            tenure_months,
            annual_rate,
            origination_date,
        })
    }

    /// Returns the principal
    pub fn principal(&self) -> Money {
        self.principal
    }

    /// Returns the tenure in months
    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    /// Returns the annual interest rate
    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    /// Returns the origination date installment due dates derive from
    pub fn origination_date(&self) -> NaiveDate {
        self.origination_date
    }
}

/// Product-level bounds applied when a loan is requested
///
/// Injected policy rather than constants: the observed product lends
/// ₹1,000–₹100,000 over 3–24 months, but other products carry other bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRules {
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            min_principal: Money::new(dec!(1000), Currency::INR),
            max_principal: Money::new(dec!(100000), Currency::INR),
            min_tenure_months: 3,
            max_tenure_months: 24,
        }
    }
}

impl ProductRules {
    /// Validates terms against the product bounds
    pub fn validate(&self, terms: &LoanTerms) -> Result<(), LoanError> {
        let principal = terms.principal();
        if principal.checked_sub(&self.min_principal)?.is_negative()
            || self.max_principal.checked_sub(&principal)?.is_negative()
        {
            return Err(LoanError::InvalidTerms(format!(
                "amount must be between {} and {}",
                self.min_principal, self.max_principal
            )));
        }

        let tenure = terms.tenure_months();
        if tenure < self.min_tenure_months || tenure > self.max_tenure_months {
            return Err(LoanError::InvalidTerms(format!(
                "tenure must be between {} and {} months",
                self.min_tenure_months, self.max_tenure_months
            )));
        }

        Ok(())
    }
}
