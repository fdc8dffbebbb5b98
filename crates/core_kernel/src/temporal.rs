//! Calendar date arithmetic for installment scheduling
//!
//! Installment due dates advance by calendar months, not 30-day blocks.
//! When the target month is shorter than the starting day-of-month, the day
//! is clipped to the last day of the target month (Jan 31 + 1 month →
//! Feb 28/29).

use chrono::{Months, NaiveDate};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date overflow: {date} + {months} months is out of range")]
    DateOverflow { date: NaiveDate, months: u32 },
}

/// Adds calendar months to a date, clipping the day-of-month when the
/// target month is shorter
pub fn add_calendar_months(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_months(Months::new(months))
        .ok_or(TemporalError::DateOverflow { date, months })
}

/// Returns the signed number of days from `from` to `to`
///
/// Positive when `to` is in the future relative to `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
