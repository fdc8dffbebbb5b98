//! Kernel-level error type
//!
//! Domain crates define their own error enums; `CoreError` covers the
//! failures that originate in the kernel itself (money arithmetic, calendar
//! math, configuration loading) plus the generic validation and state
//! failures shared across domains.

use thiserror::Error;
use crate::money::MoneyError;
use crate::temporal::TemporalError;

/// Errors raised by kernel types and kernel-level configuration
#[derive(Debug, Error)]
pub enum CoreError {
    /// Money arithmetic failed (currency mismatch, division by zero)
    #[error("money error: {0}")]
    Money(#[from] MoneyError),

    /// Calendar arithmetic failed
    #[error("temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// An input failed validation before reaching a domain operation
    #[error("validation failed: {0}")]
    Validation(String),

    /// A lifecycle action was attempted from the wrong state
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A referenced entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CoreError::InvalidStateTransition(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
