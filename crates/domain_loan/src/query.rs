//! Read-side queries over a reconciled schedule
//!
//! Pure functions, no mutation: filtering, next-due lookup, dueness
//! classification for UI urgency signaling, and the summary statistics the
//! schedule viewer renders.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use core_kernel::{days_between, Currency, Money};

use crate::schedule::ScheduleEntry;

/// Days ahead of the due date an unpaid installment counts as "due soon"
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Paid-state filter for schedule views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Paid,
    Pending,
}

/// Returns the order-preserving subsequence matching the filter
pub fn filter_by_status(schedule: &[ScheduleEntry], filter: StatusFilter) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|entry| match filter {
            StatusFilter::All => true,
            StatusFilter::Paid => entry.paid,
            StatusFilter::Pending => !entry.paid,
        })
        .collect()
}

/// First unpaid entry by ascending installment number
///
/// None means the schedule is fully repaid.
pub fn next_unpaid(schedule: &[ScheduleEntry]) -> Option<&ScheduleEntry> {
    schedule.iter().find(|entry| !entry.paid)
}

/// Urgency classification of an unpaid installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dueness {
    /// Due date has passed
    Overdue,
    /// Due within the next seven days (today inclusive)
    DueSoon,
    /// Comfortably in the future
    Pending,
}

/// Classifies an unpaid entry relative to `as_of`; paid entries are never
/// classified
///
/// An installment due exactly on `as_of` is DueSoon, not Overdue; it stays
/// Overdue until paid once the date passes.
pub fn classify_dueness(entry: &ScheduleEntry, as_of: NaiveDate) -> Option<Dueness> {
    if entry.paid {
        return None;
    }

    let classification = if entry.due_date < as_of {
        Dueness::Overdue
    } else if days_between(as_of, entry.due_date) <= DUE_SOON_WINDOW_DAYS {
        Dueness::DueSoon
    } else {
        Dueness::Pending
    };
    Some(classification)
}

/// Signed days until the entry's due date; negative when overdue
pub fn days_until_due(entry: &ScheduleEntry, as_of: NaiveDate) -> i64 {
    days_between(as_of, entry.due_date)
}

/// Aggregate statistics over a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub paid_count: u32,
    pub pending_count: u32,
    /// Interest over the entire schedule, regardless of paid state
    pub total_interest: Money,
    /// Installment amounts already paid
    pub paid_amount: Money,
    /// Installment amounts still owed
    pub pending_amount: Money,
    /// Percentage of installments paid, one decimal place
    pub progress_percent: Decimal,
}

/// Summarizes a schedule for the viewer's stat tiles
///
/// `total_interest` reflects the full generated schedule; it is fixed at
/// generation time and not reduced by foreclosure.
pub fn summarize(schedule: &[ScheduleEntry]) -> ScheduleSummary {
    let currency = schedule
        .first()
        .map(|entry| entry.installment_amount.currency())
        .unwrap_or_else(Currency::default);

    let mut paid_count = 0u32;
    let mut pending_count = 0u32;
    let mut total_interest = Money::zero(currency);
    let mut paid_amount = Money::zero(currency);
    let mut pending_amount = Money::zero(currency);

    for entry in schedule {
        total_interest = total_interest + entry.interest_portion;
        if entry.paid {
            paid_count += 1;
            paid_amount = paid_amount + entry.installment_amount;
        } else {
            pending_count += 1;
            pending_amount = pending_amount + entry.installment_amount;
        }
    }

    let progress_percent = if schedule.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(paid_count) * Decimal::from(100) / Decimal::from(schedule.len() as u32))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    };

    ScheduleSummary {
        paid_count,
        pending_count,
        total_interest,
        paid_amount,
        pending_amount,
        progress_percent,
    }
}
