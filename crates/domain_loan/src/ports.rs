//! Loan Domain Ports
//!
//! Port interfaces for the loan domain's external collaborators: the
//! persistence layer that owns loan-account state, and the notification
//! channel informed of lifecycle decisions. The engine itself never performs
//! I/O; a surrounding service wires these traits to real adapters.
//!
//! Mutating operations (`record_payment`, `record_foreclosure`) are
//! read-modify-write over `payments_made`/status and are not internally
//! atomic, so adapters must serialize them per account (a per-account lock
//! or an optimistic version check). The in-memory mock below uses a write
//! lock across the whole read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, LoanId, Money, PortError};

use crate::account::{LoanAccount, LoanStatus};
use crate::reconcile::PaymentRecord;

/// Persistence collaborator for loan accounts
#[async_trait]
pub trait LoanStorePort: DomainPort {
    /// Retrieves a loan account by ID
    async fn load_loan(&self, id: LoanId) -> Result<LoanAccount, PortError>;

    /// Persists a loan account
    async fn save_loan(&self, loan: &LoanAccount) -> Result<(), PortError>;

    /// Records one EMI payment against the loan's next unpaid installment
    ///
    /// Returns the stored payment record.
    async fn record_payment(
        &self,
        id: LoanId,
        at: DateTime<Utc>,
    ) -> Result<PaymentRecord, PortError>;

    /// Forecloses the loan, returning the settlement amount collected
    async fn record_foreclosure(&self, id: LoanId, at: DateTime<Utc>) -> Result<Money, PortError>;

    /// Persists a status change decided outside the payment path
    async fn save_status(&self, id: LoanId, status: LoanStatus) -> Result<(), PortError>;
}

/// Notification collaborator informed of lifecycle decisions
///
/// Consumes no data from the engine; delivery failures are the adapter's
/// concern.
#[async_trait]
pub trait LoanNotifierPort: DomainPort {
    /// The loan was approved
    async fn loan_approved(&self, loan: &LoanAccount) -> Result<(), PortError>;

    /// The loan was rejected
    async fn loan_rejected(&self, loan: &LoanAccount, reason: &str) -> Result<(), PortError>;
}

/// In-memory adapters for testing without a database
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    use crate::error::LoanError;

    /// In-memory implementation of [`LoanStorePort`]
    #[derive(Debug, Default)]
    pub struct MockLoanStore {
        loans: RwLock<HashMap<LoanId, LoanAccount>>,
    }

    impl MockLoanStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with loans
        pub async fn with_loans(loans: Vec<LoanAccount>) -> Self {
            let store = Self::new();
            {
                let mut guard = store.loans.write().await;
                for loan in loans {
                    guard.insert(loan.id, loan);
                }
            }
            store
        }
    }

    fn domain_error(err: LoanError) -> PortError {
        match err {
            LoanError::LoanNotActive { .. }
            | LoanError::Overpayment { .. }
            | LoanError::InvalidTransition { .. } => PortError::conflict(err.to_string()),
            other => PortError::validation(other.to_string()),
        }
    }

    impl DomainPort for MockLoanStore {}

    #[async_trait]
    impl LoanStorePort for MockLoanStore {
        async fn load_loan(&self, id: LoanId) -> Result<LoanAccount, PortError> {
            self.loans
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Loan", id))
        }

        async fn save_loan(&self, loan: &LoanAccount) -> Result<(), PortError> {
            self.loans.write().await.insert(loan.id, loan.clone());
            Ok(())
        }

        async fn record_payment(
            &self,
            id: LoanId,
            at: DateTime<Utc>,
        ) -> Result<PaymentRecord, PortError> {
            // Write lock held across the read-modify-write: at most one
            // reconciliation per account at a time
            let mut loans = self.loans.write().await;
            let loan = loans
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Loan", id))?;

            loan.record_payment(at).map_err(domain_error)?;
            loan.payments
                .last()
                .cloned()
                .ok_or_else(|| PortError::internal("payment recorded but not stored"))
        }

        async fn record_foreclosure(
            &self,
            id: LoanId,
            at: DateTime<Utc>,
        ) -> Result<Money, PortError> {
            let mut loans = self.loans.write().await;
            let loan = loans
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Loan", id))?;

            loan.foreclose(at).map_err(domain_error)
        }

        async fn save_status(&self, id: LoanId, status: LoanStatus) -> Result<(), PortError> {
            let mut loans = self.loans.write().await;
            let loan = loans
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Loan", id))?;
            loan.status = status;
            Ok(())
        }
    }

    /// Notification event captured by [`MockLoanNotifier`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NotificationEvent {
        Approved(LoanId),
        Rejected(LoanId, String),
    }

    /// In-memory implementation of [`LoanNotifierPort`] that records events
    #[derive(Debug, Default)]
    pub struct MockLoanNotifier {
        events: RwLock<Vec<NotificationEvent>>,
    }

    impl MockLoanNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn events(&self) -> Vec<NotificationEvent> {
            self.events.read().await.clone()
        }
    }

    impl DomainPort for MockLoanNotifier {}

    #[async_trait]
    impl LoanNotifierPort for MockLoanNotifier {
        async fn loan_approved(&self, loan: &LoanAccount) -> Result<(), PortError> {
            self.events
                .write()
                .await
                .push(NotificationEvent::Approved(loan.id));
            Ok(())
        }

        async fn loan_rejected(&self, loan: &LoanAccount, reason: &str) -> Result<(), PortError> {
            self.events
                .write()
                .await
                .push(NotificationEvent::Rejected(loan.id, reason.to_string()));
            Ok(())
        }
    }
}
