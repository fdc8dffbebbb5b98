//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, LoanId, Money, PartyId, Rate};
use domain_loan::LoanTerms;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive INR Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for principals within the product's lending range
pub fn principal_strategy() -> impl Strategy<Value = Money> {
    (100_000i64..=10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for tenures within the product's 3–24 month range
pub fn tenure_strategy() -> impl Strategy<Value = u32> {
    3u32..=24u32
}

/// Strategy for non-negative annual rates up to 36%, in basis points
pub fn annual_rate_strategy() -> impl Strategy<Value = Rate> {
    (0u32..=3600u32).prop_map(|bp| Rate::from_percentage(Decimal::new(bp as i64, 2)))
}

/// Strategy for origination dates across 2024–2025, including month ends
pub fn origination_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..730i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for valid loan terms
pub fn terms_strategy() -> impl Strategy<Value = LoanTerms> {
    (
        principal_strategy(),
        tenure_strategy(),
        annual_rate_strategy(),
        origination_date_strategy(),
    )
        .prop_map(|(principal, tenure, rate, origination)| {
            LoanTerms::new(principal, tenure, rate, origination)
                .expect("Generated invalid terms")
        })
}

/// Strategy for generating LoanId
pub fn loan_id_strategy() -> impl Strategy<Value = LoanId> {
    any::<[u8; 16]>().prop_map(|bytes| LoanId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating PartyId
pub fn party_id_strategy() -> impl Strategy<Value = PartyId> {
    any::<[u8; 16]>().prop_map(|bytes| PartyId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}
