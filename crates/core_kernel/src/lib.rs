//! Core Kernel - Foundational types and utilities for the lending system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar-month date arithmetic for installment scheduling
//! - Common identifiers and value objects

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, Rate, MoneyError};
pub use temporal::{add_calendar_months, days_between, TemporalError};
pub use identifiers::{LoanId, PaymentId, PartyId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
