//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the lending
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{Currency, LoanId, Money, PartyId, PaymentId, Rate};
use domain_loan::LoanTerms;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The reference principal used throughout the test suite
    pub fn inr_principal() -> Money {
        Money::new(dec!(12000.00), Currency::INR)
    }

    /// The EMI of the reference loan (12000 over 12 months at 10%)
    pub fn inr_reference_emi() -> Money {
        Money::new(dec!(1054.99), Currency::INR)
    }

    /// Smallest principal the product accepts
    pub fn inr_min_principal() -> Money {
        Money::new(dec!(1000.00), Currency::INR)
    }

    /// The observed per-borrower credit ceiling
    pub fn inr_credit_limit() -> Money {
        Money::new(dec!(100000.00), Currency::INR)
    }

    /// Creates a zero amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// Creates a USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for rate test data
pub struct RateFixtures;

impl RateFixtures {
    /// The product's fixed 10% yearly rate
    pub fn ten_percent() -> Rate {
        Rate::from_percentage(dec!(10.0))
    }

    /// Zero rate for straight-line schedules
    pub fn zero() -> Rate {
        Rate::from_percentage(dec!(0))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard origination date (Jan 15, 2025)
    pub fn origination() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// Month-end origination for day-clipping tests (Jan 31, 2025)
    pub fn month_end_origination() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    /// Timestamp of the approval decision
    pub fn approval_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap()
    }

    /// Timestamp of the k-th payment, spaced a month apart
    pub fn payment_time(k: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
            + chrono::Duration::days(30 * k as i64)
    }

    /// An "as of" date between the first and second due dates
    pub fn mid_schedule_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }
}

/// Fixture for loan terms
pub struct TermsFixtures;

impl TermsFixtures {
    /// The reference terms: 12000 over 12 months at 10%
    pub fn reference() -> LoanTerms {
        LoanTerms::new(
            MoneyFixtures::inr_principal(),
            12,
            RateFixtures::ten_percent(),
            TemporalFixtures::origination(),
        )
        .expect("reference terms are valid")
    }

    /// Interest-free terms: 1000 over 3 months
    pub fn zero_rate() -> LoanTerms {
        LoanTerms::new(
            MoneyFixtures::inr_min_principal(),
            3,
            RateFixtures::zero(),
            TemporalFixtures::origination(),
        )
        .expect("zero-rate terms are valid")
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic loan ID for testing
    pub fn loan_id() -> LoanId {
        LoanId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic party ID for testing
    pub fn party_id() -> PartyId {
        PartyId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic payment ID for testing
    pub fn payment_id() -> PaymentId {
        PaymentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}
