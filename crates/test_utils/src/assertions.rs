//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_loan::ScheduleEntry;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the structural invariants of an amortization schedule
///
/// Checks entry count, principal conservation, terminal zero balance, and
/// ordering. These are the properties `verify_schedule` enforces, restated
/// here so tests fail with a pointed message instead of an opaque error.
pub fn assert_schedule_integrity(schedule: &[ScheduleEntry], principal: &Money) {
    assert!(!schedule.is_empty(), "Schedule is empty");

    let principal_sum: Decimal = schedule.iter().map(|e| e.principal_portion.amount()).sum();
    assert_eq!(
        principal_sum,
        principal.amount(),
        "Principal portions sum to {} but principal is {}",
        principal_sum,
        principal.amount()
    );

    let last = schedule.last().unwrap();
    assert!(
        last.remaining_balance.is_zero(),
        "Terminal balance is {}, expected zero",
        last.remaining_balance.amount()
    );

    for (index, entry) in schedule.iter().enumerate() {
        assert_eq!(
            entry.installment_number,
            index as u32 + 1,
            "Installment numbers are not the sequence 1..=n"
        );
    }

    for pair in schedule.windows(2) {
        assert!(
            pair[0].due_date < pair[1].due_date,
            "Due dates not strictly increasing at #{}",
            pair[1].installment_number
        );
        assert!(
            pair[1].remaining_balance.amount() <= pair[0].remaining_balance.amount(),
            "Balance increases at #{}",
            pair[1].installment_number
        );
    }
}

/// Asserts that exactly the first `n` entries of a schedule are paid
pub fn assert_first_n_paid(schedule: &[ScheduleEntry], n: usize) {
    for (index, entry) in schedule.iter().enumerate() {
        if index < n {
            assert!(
                entry.paid && entry.payment_date.is_some(),
                "Entry #{} should be paid",
                entry.installment_number
            );
        } else {
            assert!(
                !entry.paid && entry.payment_date.is_none(),
                "Entry #{} should be unpaid",
                entry.installment_number
            );
        }
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestLoanBuilder;
    use crate::fixtures::MoneyFixtures;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_approx_eq_passes() {
        let a = Money::new(dec!(100.001), Currency::INR);
        let b = Money::new(dec!(100.002), Currency::INR);
        assert_money_approx_eq(&a, &b, dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        assert_money_approx_eq(&MoneyFixtures::inr_zero(), &MoneyFixtures::usd_100(), dec!(0.01));
    }

    #[test]
    fn test_schedule_integrity_on_generated_schedule() {
        let loan = TestLoanBuilder::new().build_approved();
        assert_schedule_integrity(&loan.schedule, &loan.terms.principal());
    }

    #[test]
    #[should_panic(expected = "Terminal balance")]
    fn test_schedule_integrity_catches_corruption() {
        let mut loan = TestLoanBuilder::new().build_approved();
        let principal = loan.terms.principal();
        let drift = Money::new(dec!(0.05), Currency::INR);
        let last = loan.schedule.last_mut().unwrap();
        last.remaining_balance = last.remaining_balance + drift;

        assert_schedule_integrity(&loan.schedule, &principal);
    }

    #[test]
    fn test_assert_first_n_paid() {
        let loan = TestLoanBuilder::new().build_with_payments(4);
        assert_first_n_paid(&loan.schedule, 4);
    }

    #[test]
    fn test_assert_ok_macro_unwraps() {
        let value: Result<u32, String> = Ok(7);
        assert_eq!(assert_ok!(value), 7);
    }

    #[test]
    fn test_assert_err_macro_unwraps() {
        let value: Result<u32, String> = Err("boom".to_string());
        assert_eq!(assert_err!(value), "boom");
    }
}
