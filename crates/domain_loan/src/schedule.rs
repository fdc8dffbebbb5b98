//! Amortization schedule generation
//!
//! Produces the canonical per-installment ledger for a loan: for each month,
//! the interest accrued on the opening balance, the principal portion of the
//! installment, and the closing balance. The generator has no knowledge of
//! payment state; overlaying actual payments is reconciliation's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use core_kernel::{add_calendar_months, Money};

use crate::error::LoanError;
use crate::installment::monthly_installment;
use crate::terms::LoanTerms;

/// One installment of a generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based installment number
    pub installment_number: u32,
    /// Due date: origination date plus `installment_number` calendar months
    pub due_date: NaiveDate,
    /// Amount due this period (the EMI; the final entry may differ by the
    /// absorbed rounding remainder)
    pub installment_amount: Money,
    /// Portion of the installment that repays principal
    pub principal_portion: Money,
    /// Interest accrued on the balance at the start of this period
    pub interest_portion: Money,
    /// Balance after this installment is applied
    pub remaining_balance: Money,
    /// Set by reconciliation, never by the generator
    pub paid: bool,
    /// Set when `paid` is set
    pub payment_date: Option<DateTime<Utc>>,
}

/// Generates the full amortization schedule for the given terms
///
/// Exactly `tenure_months` entries. Each period accrues
/// `round(balance · monthly_rate)` of interest; the principal portion is the
/// EMI minus that interest. The final installment absorbs accumulated
/// rounding drift: its principal portion is forced to the remaining balance
/// so the schedule sums exactly to the principal and terminates at zero.
///
/// Deterministic and idempotent: identical terms always produce an identical
/// schedule.
pub fn generate_schedule(terms: &LoanTerms) -> Result<Vec<ScheduleEntry>, LoanError> {
    let emi = monthly_installment(terms.principal(), terms.tenure_months(), terms.annual_rate())?;
    let monthly_rate = terms.annual_rate().monthly();

    let mut balance = terms.principal();
    let mut entries = Vec::with_capacity(terms.tenure_months() as usize);

    for number in 1..=terms.tenure_months() {
        let interest = balance.multiply(monthly_rate).round_half_up();

        let (installment, principal) = if number == terms.tenure_months() {
            // Final installment clears the residue left by per-period rounding
            let principal = balance;
            (principal.checked_add(&interest)?, principal)
        } else {
            (emi, emi.checked_sub(&interest)?)
        };

        balance = balance.checked_sub(&principal)?;

        entries.push(ScheduleEntry {
            installment_number: number,
            due_date: add_calendar_months(terms.origination_date(), number)?,
            installment_amount: installment,
            principal_portion: principal,
            interest_portion: interest,
            remaining_balance: balance,
            paid: false,
            payment_date: None,
        });
    }

    verify_schedule(&entries, terms.principal())?;
    Ok(entries)
}

/// Checks the structural invariants of a generated schedule
///
/// - principal portions sum exactly to the principal
/// - the final balance is exactly zero
/// - installment numbers and due dates are strictly increasing
/// - the running balance never increases
///
/// A violation means the calculator itself is wrong; it is logged as a
/// defect and surfaced as `LoanError::ScheduleIntegrity`, never swallowed.
pub fn verify_schedule(schedule: &[ScheduleEntry], principal: Money) -> Result<(), LoanError> {
    let fail = |detail: String| {
        error!(detail = %detail, "amortization schedule failed integrity check");
        Err(LoanError::ScheduleIntegrity(detail))
    };

    let Some(last) = schedule.last() else {
        return fail("schedule is empty".to_string());
    };

    let mut principal_sum = Money::zero(principal.currency());
    for entry in schedule {
        principal_sum = principal_sum.checked_add(&entry.principal_portion)?;
    }
    if principal_sum != principal {
        return fail(format!(
            "principal portions sum to {} but principal is {}",
            principal_sum, principal
        ));
    }

    if !last.remaining_balance.is_zero() {
        return fail(format!(
            "terminal balance is {}, expected zero",
            last.remaining_balance
        ));
    }

    let mut previous: Option<&ScheduleEntry> = None;
    for entry in schedule {
        if let Some(prev) = previous {
            if entry.installment_number <= prev.installment_number {
                return fail(format!(
                    "installment numbers not strictly increasing at #{}",
                    entry.installment_number
                ));
            }
            if entry.due_date <= prev.due_date {
                return fail(format!(
                    "due dates not strictly increasing at #{}",
                    entry.installment_number
                ));
            }
            if entry
                .remaining_balance
                .checked_sub(&prev.remaining_balance)?
                .is_positive()
            {
                return fail(format!(
                    "balance increases at installment #{}",
                    entry.installment_number
                ));
            }
        }
        previous = Some(entry);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Rate};
    use rust_decimal_macros::dec;

    fn terms(principal: rust_decimal::Decimal, tenure: u32, rate: rust_decimal::Decimal) -> LoanTerms {
        LoanTerms::new(
            Money::new(principal, Currency::INR),
            tenure,
            Rate::from_percentage(rate),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_schedule_first_and_last_entries() {
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();

        assert_eq!(schedule.len(), 12);

        let first = &schedule[0];
        assert_eq!(first.installment_amount.amount(), dec!(1054.99));
        assert_eq!(first.interest_portion.amount(), dec!(100.00));
        assert_eq!(first.principal_portion.amount(), dec!(954.99));
        assert_eq!(first.remaining_balance.amount(), dec!(11045.01));
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());

        let last = &schedule[11];
        assert!(last.remaining_balance.is_zero());
        assert_eq!(last.due_date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_zero_rate_last_entry_absorbs_remainder() {
        let schedule = generate_schedule(&terms(dec!(1000), 3, dec!(0))).unwrap();

        assert_eq!(schedule[0].installment_amount.amount(), dec!(333.33));
        assert_eq!(schedule[1].installment_amount.amount(), dec!(333.33));
        assert_eq!(schedule[2].installment_amount.amount(), dec!(333.34));
        assert!(schedule.iter().all(|e| e.interest_portion.is_zero()));
        assert!(schedule[2].remaining_balance.is_zero());
    }

    #[test]
    fn test_generator_is_idempotent() {
        let t = terms(dec!(77777), 17, dec!(10));
        assert_eq!(generate_schedule(&t).unwrap(), generate_schedule(&t).unwrap());
    }

    #[test]
    fn test_generator_leaves_entries_unpaid() {
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        assert!(schedule.iter().all(|e| !e.paid && e.payment_date.is_none()));
    }

    #[test]
    fn test_verify_rejects_corrupted_principal() {
        let mut schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        schedule[3].principal_portion =
            schedule[3].principal_portion + Money::new(dec!(0.05), Currency::INR);

        let result = verify_schedule(&schedule, Money::new(dec!(12000), Currency::INR));
        assert!(matches!(result, Err(LoanError::ScheduleIntegrity(_))));
    }

    #[test]
    fn test_verify_rejects_nonzero_terminal_balance() {
        let mut schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let drift = Money::new(dec!(0.03), Currency::INR);
        schedule[11].remaining_balance = schedule[11].remaining_balance + drift;

        let result = verify_schedule(&schedule, Money::new(dec!(12000), Currency::INR));
        assert!(matches!(result, Err(LoanError::ScheduleIntegrity(_))));
    }

    #[test]
    fn test_verify_rejects_empty_schedule() {
        let result = verify_schedule(&[], Money::new(dec!(12000), Currency::INR));
        assert!(matches!(result, Err(LoanError::ScheduleIntegrity(_))));
    }

    #[test]
    fn test_month_end_origination_clips_due_dates() {
        let t = LoanTerms::new(
            Money::new(dec!(12000), Currency::INR),
            3,
            Rate::from_percentage(dec!(10)),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap();

        let schedule = generate_schedule(&t).unwrap();
        assert_eq!(schedule[0].due_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(schedule[1].due_date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(schedule[2].due_date, NaiveDate::from_ymd_opt(2025, 4, 30).unwrap());
    }
}
