//! Loan Account Aggregate
//!
//! The loan account is the consistency boundary for a single loan: terms,
//! lifecycle status, the generated schedule, and the payments recorded
//! against it. All mutating operations go through the aggregate so status
//! checks and payment ordering cannot be bypassed.
//!
//! # Lifecycle
//!
//! ```text
//! PENDING ──approve──▶ APPROVED ──all EMIs paid──▶ REPAID
//!    │                     │
//!    └──reject──▶ REJECTED └──foreclose──▶ FORECLOSED
//! ```
//!
//! REJECTED, REPAID, and FORECLOSED are terminal. Terms never change after
//! the request is opened.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{LoanId, Money, PartyId, PaymentId};

use crate::error::LoanError;
use crate::installment::{emi_quote, EmiQuote};
use crate::query::next_unpaid;
use crate::reconcile::{foreclosure_settlement, PaymentKind, PaymentRecord};
use crate::schedule::{generate_schedule, ScheduleEntry};
use crate::terms::{LoanTerms, ProductRules};

/// Loan lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Requested, awaiting an approval decision
    Pending,
    /// Approved and actively repaying
    Approved,
    /// Rejected; terminal, no schedule semantics
    Rejected,
    /// Every installment paid
    Repaid,
    /// Closed early by a lump-sum settlement
    Foreclosed,
}

impl LoanStatus {
    /// Returns true for states that accept payments
    pub fn is_active(&self) -> bool {
        matches!(self, LoanStatus::Approved)
    }

    /// Returns true for terminal states
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            LoanStatus::Rejected | LoanStatus::Repaid | LoanStatus::Foreclosed
        )
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
            LoanStatus::Repaid => "REPAID",
            LoanStatus::Foreclosed => "FORECLOSED",
        };
        write!(f, "{}", label)
    }
}

/// Record of an executed foreclosure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeclosureRecord {
    pub amount: Money,
    pub foreclosed_at: DateTime<Utc>,
}

/// The mutable loan aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAccount {
    pub id: LoanId,
    pub borrower: PartyId,
    pub terms: LoanTerms,
    /// EMI figures computed at request time; never revised
    pub quote: EmiQuote,
    pub status: LoanStatus,
    /// Count of successful EMI payments, 0..=tenure
    pub payments_made: u32,
    /// Generated on approval; empty while pending
    pub schedule: Vec<ScheduleEntry>,
    pub payments: Vec<PaymentRecord>,
    pub applied_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub foreclosure: Option<ForeclosureRecord>,
}

impl LoanAccount {
    /// Opens a new loan request in PENDING status
    ///
    /// Terms are validated against the product rules and the EMI quote is
    /// computed up front, so the applicant sees the exact installment the
    /// schedule will later be built from.
    pub fn open(
        borrower: PartyId,
        terms: LoanTerms,
        rules: &ProductRules,
    ) -> Result<Self, LoanError> {
        rules.validate(&terms)?;
        let quote = emi_quote(terms.principal(), terms.tenure_months(), terms.annual_rate())?;

        Ok(Self {
            id: LoanId::new_v7(),
            borrower,
            terms,
            quote,
            status: LoanStatus::Pending,
            payments_made: 0,
            schedule: Vec::new(),
            payments: Vec::new(),
            applied_at: Utc::now(),
            approved_at: None,
            rejection_reason: None,
            foreclosure: None,
        })
    }

    /// Approves the loan and generates its canonical schedule
    pub fn approve(&mut self, at: DateTime<Utc>) -> Result<(), LoanError> {
        if self.status != LoanStatus::Pending {
            return Err(LoanError::InvalidTransition {
                loan_id: self.id,
                from: self.status,
                action: "approve",
            });
        }

        self.schedule = generate_schedule(&self.terms)?;
        self.approved_at = Some(at);
        self.status = LoanStatus::Approved;
        info!(loan_id = %self.id, "loan approved");
        Ok(())
    }

    /// Rejects the loan request; terminal
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), LoanError> {
        if self.status != LoanStatus::Pending {
            return Err(LoanError::InvalidTransition {
                loan_id: self.id,
                from: self.status,
                action: "reject",
            });
        }

        self.rejection_reason = Some(reason.into());
        self.status = LoanStatus::Rejected;
        Ok(())
    }

    /// Records one successful EMI payment against the next unpaid installment
    ///
    /// Transitions to REPAID when the final installment is paid. Returns the
    /// settled entry.
    pub fn record_payment(&mut self, at: DateTime<Utc>) -> Result<&ScheduleEntry, LoanError> {
        if !self.status.is_active() {
            return Err(LoanError::LoanNotActive {
                loan_id: self.id,
                status: self.status,
                operation: "record a payment",
            });
        }

        let index = self
            .schedule
            .iter()
            .position(|entry| !entry.paid)
            .ok_or(LoanError::Overpayment {
                loan_id: self.id,
                tenure_months: self.terms.tenure_months(),
            })?;

        {
            let entry = &mut self.schedule[index];
            entry.paid = true;
            entry.payment_date = Some(at);
        }

        let entry = &self.schedule[index];
        self.payments.push(PaymentRecord {
            id: PaymentId::new_v7(),
            kind: PaymentKind::Emi,
            installment_number: Some(entry.installment_number),
            amount: entry.installment_amount,
            paid_at: at,
        });

        self.payments_made += 1;
        if self.payments_made == self.terms.tenure_months() {
            self.status = LoanStatus::Repaid;
            info!(loan_id = %self.id, "loan fully repaid");
        }

        Ok(&self.schedule[index])
    }

    /// Forecloses the loan: outstanding principal is collected as one lump
    /// sum and every remaining installment is settled collectively
    ///
    /// Irreversible. Returns the settlement amount.
    pub fn foreclose(&mut self, at: DateTime<Utc>) -> Result<Money, LoanError> {
        if !self.status.is_active() {
            return Err(LoanError::LoanNotActive {
                loan_id: self.id,
                status: self.status,
                operation: "foreclose",
            });
        }

        let settlement =
            foreclosure_settlement(&self.schedule, self.terms.principal(), at.date_naive());

        self.payments.push(PaymentRecord {
            id: PaymentId::new_v7(),
            kind: PaymentKind::Foreclosure,
            installment_number: None,
            amount: settlement.amount,
            paid_at: at,
        });
        self.foreclosure = Some(ForeclosureRecord {
            amount: settlement.amount,
            foreclosed_at: at,
        });
        self.status = LoanStatus::Foreclosed;
        info!(loan_id = %self.id, amount = %settlement.amount, "loan foreclosed");

        Ok(settlement.amount)
    }

    /// The schedule an applicant would repay on, before approval
    ///
    /// Identical to the schedule `approve` will store; generated on demand
    /// for previews so nothing is persisted for loans that may be rejected.
    pub fn projected_schedule(&self) -> Result<Vec<ScheduleEntry>, LoanError> {
        generate_schedule(&self.terms)
    }

    /// The next installment due, or None when nothing is outstanding
    pub fn next_payment(&self) -> Option<&ScheduleEntry> {
        if !self.status.is_active() {
            return None;
        }
        next_unpaid(&self.schedule)
    }

    /// Number of installments still unpaid
    pub fn payments_remaining(&self) -> u32 {
        self.terms.tenure_months().saturating_sub(self.payments_made)
    }

    /// Remaining principal balance, the amount a foreclosure would collect
    ///
    /// Full principal when no installment is paid yet; zero for loans that
    /// are not active.
    pub fn outstanding_balance(&self) -> Money {
        if !self.status.is_active() {
            return Money::zero(self.terms.principal().currency());
        }
        if self.payments_made == 0 {
            return self.terms.principal();
        }
        self.schedule
            .iter()
            .rev()
            .find(|entry| entry.paid)
            .map(|entry| entry.remaining_balance)
            .unwrap_or_else(|| self.terms.principal())
    }
}
