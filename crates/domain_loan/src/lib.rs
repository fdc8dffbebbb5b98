//! Loan Domain - Amortization Engine
//!
//! This crate implements the computational core of the lending system:
//! fixed-rate EMI (equated monthly installment) calculation, amortization
//! schedule generation with running-balance bookkeeping, reconciliation of
//! actual payment events against the generated schedule, and the read-side
//! queries the dashboards are built on.
//!
//! # Money Flow
//!
//! ```text
//! LoanTerms ──▶ EMI calculator ──▶ Schedule generator ──▶ canonical schedule
//!                                                              │
//!                       payment / foreclosure events ──▶ reconciliation
//!                                                              │
//!                               queries, summaries, CSV ◀──────┘
//! ```
//!
//! Every operation is a pure or near-pure function over in-memory values;
//! persistence and notification are reached only through the port traits in
//! [`ports`]. Callers own concurrency: at most one reconciliation may run
//! against a loan account at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_loan::{LoanTerms, generate_schedule, monthly_installment};
//!
//! let terms = LoanTerms::new(principal, 12, annual_rate, origination)?;
//! let emi = monthly_installment(terms.principal(), 12, terms.annual_rate())?;
//! let schedule = generate_schedule(&terms)?;
//! ```

pub mod terms;
pub mod installment;
pub mod schedule;
pub mod account;
pub mod reconcile;
pub mod query;
pub mod portfolio;
pub mod export;
pub mod error;
pub mod ports;

pub use terms::{LoanTerms, ProductRules};
pub use installment::{monthly_installment, emi_quote, EmiQuote};
pub use schedule::{ScheduleEntry, generate_schedule, verify_schedule};
pub use account::{LoanAccount, LoanStatus, ForeclosureRecord};
pub use reconcile::{reconcile, foreclosure_settlement, ForeclosureSettlement, PaymentRecord, PaymentKind};
pub use query::{StatusFilter, Dueness, ScheduleSummary, filter_by_status, next_unpaid, classify_dueness, days_until_due, summarize, DUE_SOON_WINDOW_DAYS};
pub use portfolio::{CreditPolicy, PortfolioTotals, portfolio_totals};
pub use export::{schedule_to_csv, schedule_filename, SCHEDULE_CSV_HEADERS};
pub use error::LoanError;
