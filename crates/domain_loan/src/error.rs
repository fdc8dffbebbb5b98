//! Loan domain errors

use thiserror::Error;

use core_kernel::{LoanId, Money, MoneyError, TemporalError};

use crate::account::LoanStatus;

/// Errors that can occur in the loan domain
///
/// All variants are terminal for the operation that raised them: the inputs
/// are deterministic, so retrying without changing state reproduces the same
/// error. `ScheduleIntegrity` indicates a calculator defect and is logged
/// before being returned.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Malformed principal, tenure, or rate
    #[error("Invalid loan terms: {0}")]
    InvalidTerms(String),

    /// Payment or foreclosure attempted on a loan that is not APPROVED
    #[error("Loan {loan_id} is not active (status {status}): cannot {operation}")]
    LoanNotActive {
        loan_id: LoanId,
        status: LoanStatus,
        operation: &'static str,
    },

    /// Payment recorded against an already-fully-paid schedule
    #[error("Loan {loan_id}: all {tenure_months} installments are already paid")]
    Overpayment {
        loan_id: LoanId,
        tenure_months: u32,
    },

    /// Internal invariant violation in a generated schedule
    #[error("Schedule integrity violation: {0}")]
    ScheduleIntegrity(String),

    /// Lifecycle action not allowed from the current status
    #[error("Loan {loan_id}: cannot {action} a loan in status {from}")]
    InvalidTransition {
        loan_id: LoanId,
        from: LoanStatus,
        action: &'static str,
    },

    /// New application would push the borrower past the credit ceiling
    #[error("Credit limit exceeded: requested {requested} with {outstanding} already outstanding against limit {limit}")]
    CreditLimitExceeded {
        requested: Money,
        outstanding: Money,
        limit: Money,
    },

    /// Schedule export failed
    #[error("CSV export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),
}
