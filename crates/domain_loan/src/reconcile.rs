//! Payment reconciliation
//!
//! Overlays actual payment events onto the generated schedule. Payments are
//! applied strictly in schedule order: the Nth recorded payment settles the
//! Nth unpaid installment, regardless of when it arrived. This models "pay
//! next EMI" semantics; an installment can never be paid while an earlier
//! one is outstanding.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{LoanId, Money, PaymentId};

use crate::error::LoanError;
use crate::schedule::ScheduleEntry;

/// How a payment settled part of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    /// Regular EMI payment against one installment
    Emi,
    /// Lump-sum foreclosure settlement
    Foreclosure,
}

/// A recorded payment against a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub kind: PaymentKind,
    /// The installment this payment covers; None for foreclosure settlements
    pub installment_number: Option<u32>,
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
}

/// Applies payment events to a schedule in installment order
///
/// The Nth event marks the Nth unpaid entry (ascending installment number)
/// as paid with the event's timestamp. Event timestamps do not influence
/// which installment they settle.
///
/// # Errors
///
/// `LoanError::Overpayment` if an event arrives after every installment is
/// already paid. Entries settled before the failing event stay settled; the
/// caller decides whether to keep or discard the partial overlay.
pub fn reconcile(
    loan_id: LoanId,
    schedule: &mut [ScheduleEntry],
    events: &[DateTime<Utc>],
) -> Result<(), LoanError> {
    let tenure_months = schedule.len() as u32;
    for &paid_at in events {
        let entry = schedule
            .iter_mut()
            .find(|entry| !entry.paid)
            .ok_or(LoanError::Overpayment {
                loan_id,
                tenure_months,
            })?;

        entry.paid = true;
        entry.payment_date = Some(paid_at);
    }
    Ok(())
}

/// Outcome of foreclosing a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeclosureSettlement {
    /// Outstanding principal collected as one lump sum
    pub amount: Money,
    /// Installments short-circuited by the settlement; they are settled
    /// collectively, not individually marked paid
    pub settled_installments: Vec<u32>,
    pub as_of: NaiveDate,
}

/// Computes the foreclosure settlement for a schedule
///
/// The settlement is the remaining principal balance only: the balance after
/// the last paid installment, or the full principal when nothing has been
/// paid. No prepayment penalty, no residual interest.
pub fn foreclosure_settlement(
    schedule: &[ScheduleEntry],
    principal: Money,
    as_of: NaiveDate,
) -> ForeclosureSettlement {
    let amount = schedule
        .iter()
        .rev()
        .find(|entry| entry.paid)
        .map(|entry| entry.remaining_balance)
        .unwrap_or(principal);

    let settled_installments = schedule
        .iter()
        .filter(|entry| !entry.paid)
        .map(|entry| entry.installment_number)
        .collect();

    ForeclosureSettlement {
        amount,
        settled_installments,
        as_of,
    }
}
