//! Schedule export
//!
//! Serializes a repayment schedule to CSV for download. Column order and
//! labels match the schedule viewer; numeric fields always carry two decimal
//! places, and unpaid entries get a `-` placeholder in the payment-date
//! column.

use rust_decimal::RoundingStrategy;

use core_kernel::{LoanId, Money};

use crate::error::LoanError;
use crate::schedule::ScheduleEntry;

/// CSV header row, in column order
pub const SCHEDULE_CSV_HEADERS: [&str; 8] = [
    "EMI #",
    "Due Date",
    "EMI Amount",
    "Principal",
    "Interest",
    "Balance",
    "Status",
    "Payment Date",
];

/// Renders a schedule as CSV text
///
/// Fields containing the delimiter, a quote, or a newline are quote-wrapped
/// with internal quotes doubled (the writer's standard quoting). An empty
/// schedule produces header-only output.
pub fn schedule_to_csv(schedule: &[ScheduleEntry]) -> Result<String, LoanError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(SCHEDULE_CSV_HEADERS)
        .map_err(|e| LoanError::Export(e.to_string()))?;

    for entry in schedule {
        writer
            .write_record(&[
                entry.installment_number.to_string(),
                entry.due_date.format("%Y-%m-%d").to_string(),
                format_amount(entry.installment_amount),
                format_amount(entry.principal_portion),
                format_amount(entry.interest_portion),
                format_amount(entry.remaining_balance),
                if entry.paid { "Paid" } else { "Pending" }.to_string(),
                entry
                    .payment_date
                    .map(|at| at.date_naive().format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ])
            .map_err(|e| LoanError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LoanError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LoanError::Export(e.to_string()))
}

/// Download filename for a loan's schedule
pub fn schedule_filename(loan_id: LoanId) -> String {
    format!("loan_{}_schedule.csv", loan_id.as_uuid())
}

fn format_amount(amount: Money) -> String {
    format!(
        "{:.2}",
        amount
            .amount()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
