//! EMI (Equated Monthly Installment) calculation
//!
//! The single implementation of the fixed-rate amortization formula. Every
//! call site (application preview, dashboard, schedule generation) goes
//! through here, so the rounding behavior cannot drift between screens.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

use crate::error::LoanError;

/// Computes the fixed monthly installment for a loan
///
/// Standard amortization formula with monthly compounding:
///
/// ```text
/// EMI = P · r · (1+r)^n / ((1+r)^n − 1)     r = annual% / 100 / 12
/// ```
///
/// A zero rate degenerates to straight-line repayment (`P / n`). The result
/// is rounded half-up to minor-currency units.
///
/// # Errors
///
/// `LoanError::InvalidTerms` when the principal is not positive, the tenure
/// is zero, or the rate is negative.
pub fn monthly_installment(
    principal: Money,
    tenure_months: u32,
    annual_rate: Rate,
) -> Result<Money, LoanError> {
    validate_inputs(principal, tenure_months, annual_rate)?;

    let monthly_rate = annual_rate.monthly();

    let emi = if monthly_rate.is_zero() {
        principal.divide(Decimal::from(tenure_months))?
    } else {
        let growth = (Decimal::ONE + monthly_rate).powu(u64::from(tenure_months));
        principal.multiply(monthly_rate * growth / (growth - Decimal::ONE))
    };

    Ok(emi.round_half_up())
}

/// The EMI triple shown to an applicant before submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    /// The fixed monthly installment
    pub monthly_installment: Money,
    /// Total amount payable over the full tenure
    pub total_payable: Money,
    /// Interest component of the total payable
    pub total_interest: Money,
}

/// Computes the full EMI quote (installment, total payable, total interest)
///
/// The quote is fixed when the loan is requested and is not revised by later
/// events; a foreclosure settles remaining principal without recomputing
/// interest.
pub fn emi_quote(
    principal: Money,
    tenure_months: u32,
    annual_rate: Rate,
) -> Result<EmiQuote, LoanError> {
    let emi = monthly_installment(principal, tenure_months, annual_rate)?;

    let total_payable = if annual_rate.monthly().is_zero() {
        principal.round_half_up()
    } else {
        emi.multiply(Decimal::from(tenure_months)).round_half_up()
    };
    let total_interest = total_payable.checked_sub(&principal.round_half_up())?;

    Ok(EmiQuote {
        monthly_installment: emi,
        total_payable,
        total_interest,
    })
}

fn validate_inputs(
    principal: Money,
    tenure_months: u32,
    annual_rate: Rate,
) -> Result<(), LoanError> {
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
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    #[test]
    fn test_reference_emi() {
        // 12000 over 12 months at 10% p.a. (monthly rate 0.008333...)
        let emi = monthly_installment(inr(dec!(12000)), 12, Rate::from_percentage(dec!(10))).unwrap();
        assert_eq!(emi.amount(), dec!(1054.99));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let emi = monthly_installment(inr(dec!(1000)), 3, Rate::from_percentage(dec!(0))).unwrap();
        assert_eq!(emi.amount(), dec!(333.33));
    }

    #[test]
    fn test_single_month_tenure() {
        // One installment repays principal plus one month of interest
        let emi = monthly_installment(inr(dec!(12000)), 1, Rate::from_percentage(dec!(10))).unwrap();
        assert_eq!(emi.amount(), dec!(12100.00));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let a = monthly_installment(inr(dec!(54321)), 18, Rate::from_percentage(dec!(10))).unwrap();
        let b = monthly_installment(inr(dec!(54321)), 18, Rate::from_percentage(dec!(10))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            monthly_installment(inr(dec!(0)), 12, Rate::from_percentage(dec!(10))),
            Err(LoanError::InvalidTerms(_))
        ));
        assert!(matches!(
            monthly_installment(inr(dec!(-1)), 12, Rate::from_percentage(dec!(10))),
            Err(LoanError::InvalidTerms(_))
        ));
        assert!(matches!(
            monthly_installment(inr(dec!(12000)), 0, Rate::from_percentage(dec!(10))),
            Err(LoanError::InvalidTerms(_))
        ));
        assert!(matches!(
            monthly_installment(inr(dec!(12000)), 12, Rate::from_percentage(dec!(-0.5))),
            Err(LoanError::InvalidTerms(_))
        ));
    }

    #[test]
    fn test_quote_totals() {
        let quote = emi_quote(inr(dec!(12000)), 12, Rate::from_percentage(dec!(10))).unwrap();

        assert_eq!(quote.monthly_installment.amount(), dec!(1054.99));
        assert_eq!(quote.total_payable.amount(), dec!(12659.88));
        assert_eq!(quote.total_interest.amount(), dec!(659.88));
    }

    #[test]
    fn test_quote_zero_rate() {
        let quote = emi_quote(inr(dec!(1000)), 3, Rate::from_percentage(dec!(0))).unwrap();

        assert_eq!(quote.monthly_installment.amount(), dec!(333.33));
        assert_eq!(quote.total_payable.amount(), dec!(1000.00));
        assert_eq!(quote.total_interest.amount(), dec!(0.00));
    }
}
