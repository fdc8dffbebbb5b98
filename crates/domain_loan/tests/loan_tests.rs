//! Comprehensive tests for domain_loan

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, LoanId, Money, PartyId, Rate};

use domain_loan::{
    classify_dueness, emi_quote, filter_by_status, generate_schedule, monthly_installment,
    next_unpaid, portfolio_totals, reconcile, schedule_to_csv, summarize, CreditPolicy, Dueness,
    LoanAccount, LoanError, LoanStatus, LoanTerms, ProductRules, StatusFilter,
};

fn inr(amount: Decimal) -> Money {
    Money::new(amount, Currency::INR)
}

fn terms(principal: Decimal, tenure: u32, rate: Decimal) -> LoanTerms {
    LoanTerms::new(
        inr(principal),
        tenure,
        Rate::from_percentage(rate),
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    )
    .unwrap()
}

fn ts(month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 10, 30, 0).unwrap()
}

// ============================================================================
// Reference Scenario (12000 over 12 months at 10% p.a.)
// ============================================================================

mod reference_scenario {
    use super::*;

    #[test]
    fn test_emi_matches_hand_computed_value() {
        let emi = monthly_installment(inr(dec!(12000)), 12, Rate::from_percentage(dec!(10)))
            .unwrap();
        assert_eq!(emi.amount(), dec!(1054.99));
    }

    #[test]
    fn test_schedule_walks_the_balance_to_zero() {
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].interest_portion.amount(), dec!(100.00));
        assert_eq!(schedule[0].principal_portion.amount(), dec!(954.99));
        assert_eq!(schedule[0].remaining_balance.amount(), dec!(11045.01));
        assert_eq!(schedule[11].remaining_balance.amount(), dec!(0.00));

        let principal_sum: Decimal = schedule.iter().map(|e| e.principal_portion.amount()).sum();
        assert_eq!(principal_sum, dec!(12000));
    }

    #[test]
    fn test_every_installment_but_last_equals_the_emi() {
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let emi = monthly_installment(inr(dec!(12000)), 12, Rate::from_percentage(dec!(10)))
            .unwrap();

        for entry in &schedule[..11] {
            assert_eq!(entry.installment_amount, emi);
        }
    }

    #[test]
    fn test_quote_is_consistent_with_schedule_interest() {
        let quote = emi_quote(inr(dec!(12000)), 12, Rate::from_percentage(dec!(10))).unwrap();
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let summary = summarize(&schedule);

        // Quote interest is EMI × n − P; schedule interest differs only by
        // the drift the final installment absorbed
        let diff = quote.total_interest - summary.total_interest;
        assert!(diff.amount().abs() <= dec!(0.12));
    }
}

// ============================================================================
// Zero-Rate Loans
// ============================================================================

mod zero_rate {
    use super::*;

    #[test]
    fn test_straight_line_repayment() {
        let schedule = generate_schedule(&terms(dec!(1000), 3, dec!(0))).unwrap();

        let amounts: Vec<Decimal> = schedule
            .iter()
            .map(|e| e.installment_amount.amount())
            .collect();
        assert_eq!(amounts, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);

        assert!(schedule.iter().all(|e| e.interest_portion.is_zero()));
        assert!(schedule.last().unwrap().remaining_balance.is_zero());
    }

    #[test]
    fn test_zero_rate_quote_has_no_interest() {
        let quote = emi_quote(inr(dec!(1000)), 3, Rate::from_percentage(dec!(0))).unwrap();
        assert!(quote.total_interest.is_zero());
        assert_eq!(quote.total_payable, inr(dec!(1000)));
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

mod reconciliation {
    use super::*;

    #[test]
    fn test_n_events_mark_first_n_entries() {
        let mut schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let events: Vec<_> = (1..=5).map(|d| ts(3, d)).collect();

        reconcile(LoanId::new(), &mut schedule, &events).unwrap();

        for entry in &schedule[..5] {
            assert!(entry.paid);
            assert!(entry.payment_date.is_some());
        }
        for entry in &schedule[5..] {
            assert!(!entry.paid);
        }
    }

    #[test]
    fn test_thirteenth_event_is_overpayment() {
        let mut schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let events: Vec<_> = (1..=12).map(|d| ts(3, d)).collect();
        reconcile(LoanId::new(), &mut schedule, &events).unwrap();

        let excess = reconcile(LoanId::new(), &mut schedule, &[ts(4, 1)]);
        assert!(matches!(excess, Err(LoanError::Overpayment { .. })));
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    fn open(principal: Decimal) -> LoanAccount {
        LoanAccount::open(PartyId::new(), terms(principal, 12, dec!(10)), &ProductRules::default())
            .unwrap()
    }

    #[test]
    fn test_happy_path_to_repaid() {
        let mut loan = open(dec!(12000));
        loan.approve(ts(1, 20)).unwrap();

        for day in 1..=12 {
            loan.record_payment(ts(2, day)).unwrap();
        }

        assert_eq!(loan.status, LoanStatus::Repaid);
        assert!(loan.status.is_closed());
        assert!(next_unpaid(&loan.schedule).is_none());
        assert_eq!(summarize(&loan.schedule).progress_percent, dec!(100.0));
    }

    #[test]
    fn test_foreclosure_short_circuits_the_schedule() {
        let mut loan = open(dec!(12000));
        loan.approve(ts(1, 20)).unwrap();
        loan.record_payment(ts(2, 1)).unwrap();
        loan.record_payment(ts(3, 1)).unwrap();

        let settled = loan.foreclose(ts(3, 15)).unwrap();

        // Balance after EMI #2
        assert_eq!(settled, loan.schedule[1].remaining_balance);
        assert_eq!(loan.status, LoanStatus::Foreclosed);
        // Remaining entries are settled collectively, not marked paid
        assert_eq!(filter_by_status(&loan.schedule, StatusFilter::Paid).len(), 2);
    }

    #[test]
    fn test_errors_carry_loan_context() {
        let mut loan = open(dec!(12000));
        let err = loan.record_payment(ts(2, 1)).unwrap_err();

        let message = err.to_string();
        assert!(message.contains(&loan.id.to_string()));
        assert!(message.contains("PENDING"));
    }

    #[test]
    fn test_rejected_loan_has_no_schedule_semantics() {
        let mut loan = open(dec!(12000));
        loan.reject("profile incomplete").unwrap();

        assert!(loan.schedule.is_empty());
        assert!(loan.next_payment().is_none());
        assert!(loan.outstanding_balance().is_zero());
    }
}

// ============================================================================
// Dueness & Dashboard Queries
// ============================================================================

mod queries {
    use super::*;

    #[test]
    fn test_dueness_over_a_schedule() {
        let schedule = generate_schedule(&terms(dec!(12000), 12, dec!(10))).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();

        // Feb 15 installment is overdue; Mar 15 is ten days out, beyond the
        // 7-day window
        assert_eq!(classify_dueness(&schedule[0], today), Some(Dueness::Overdue));
        assert_eq!(classify_dueness(&schedule[1], today), Some(Dueness::Pending));

        let near = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert_eq!(classify_dueness(&schedule[1], near), Some(Dueness::DueSoon));
    }

    #[test]
    fn test_portfolio_dashboard_numbers() {
        let policy = CreditPolicy::default();

        let mut active = LoanAccount::open(
            PartyId::new(),
            terms(dec!(12000), 12, dec!(10)),
            &ProductRules::default(),
        )
        .unwrap();
        active.approve(ts(1, 20)).unwrap();
        active.record_payment(ts(2, 1)).unwrap();

        let pending = LoanAccount::open(
            PartyId::new(),
            terms(dec!(20000), 12, dec!(10)),
            &ProductRules::default(),
        )
        .unwrap();

        let totals = portfolio_totals(&[active, pending], &policy);

        assert_eq!(totals.total_loans, 2);
        assert_eq!(totals.active_loans, 1);
        assert_eq!(totals.pending_loans, 1);
        assert_eq!(totals.total_outstanding.amount(), dec!(11604.89)); // 1054.99 × 11
        assert_eq!(totals.used_limit.amount(), dec!(32000));
        assert_eq!(totals.available_limit.amount(), dec!(68000));
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization {
    use super::*;

    #[test]
    fn test_account_json_round_trip() {
        let mut loan = LoanAccount::open(
            PartyId::new(),
            terms(dec!(12000), 12, dec!(10)),
            &ProductRules::default(),
        )
        .unwrap();
        loan.approve(ts(1, 20)).unwrap();
        loan.record_payment(ts(2, 1)).unwrap();

        let json = serde_json::to_string(&loan).unwrap();
        let back: LoanAccount = serde_json::from_str(&json).unwrap();

        assert_eq!(back, loan);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::Foreclosed).unwrap(),
            "\"FORECLOSED\""
        );
    }

    #[test]
    fn test_csv_export_of_live_schedule() {
        let mut loan = LoanAccount::open(
            PartyId::new(),
            terms(dec!(12000), 12, dec!(10)),
            &ProductRules::default(),
        )
        .unwrap();
        loan.approve(ts(1, 20)).unwrap();
        loan.record_payment(ts(2, 1)).unwrap();

        let csv = schedule_to_csv(&loan.schedule).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[1].contains("Paid"));
        assert!(lines[2].contains("Pending"));
    }
}

// ============================================================================
// Schedule Properties
// ============================================================================

mod schedule_properties {
    use super::*;
    use proptest::prelude::*;

    fn terms_strategy() -> impl Strategy<Value = LoanTerms> {
        // Principals in paise across the product range, tenures 1..=36,
        // rates 0..=36%
        (
            100_000i64..10_000_000i64,
            1u32..=36u32,
            0u32..=3600u32,
            0i64..=1000i64,
        )
            .prop_map(|(principal_minor, tenure, rate_bp, day_offset)| {
                let origination = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(day_offset);
                LoanTerms::new(
                    Money::from_minor(principal_minor, Currency::INR),
                    tenure,
                    Rate::from_percentage(Decimal::new(rate_bp as i64, 2)),
                    origination,
                )
                .expect("strategy produced invalid terms")
            })
    }

    proptest! {
        #[test]
        fn schedule_has_tenure_entries_and_sums_to_principal(t in terms_strategy()) {
            let schedule = generate_schedule(&t).unwrap();

            prop_assert_eq!(schedule.len(), t.tenure_months() as usize);

            let principal_sum: Decimal =
                schedule.iter().map(|e| e.principal_portion.amount()).sum();
            prop_assert_eq!(principal_sum, t.principal().amount());

            prop_assert!(schedule.last().unwrap().remaining_balance.is_zero());
        }

        #[test]
        fn balances_never_increase(t in terms_strategy()) {
            let schedule = generate_schedule(&t).unwrap();

            let mut previous = t.principal().amount();
            for entry in &schedule {
                prop_assert!(entry.remaining_balance.amount() <= previous);
                previous = entry.remaining_balance.amount();
            }
        }

        #[test]
        fn due_dates_strictly_increase(t in terms_strategy()) {
            let schedule = generate_schedule(&t).unwrap();

            for pair in schedule.windows(2) {
                prop_assert!(pair[0].due_date < pair[1].due_date);
            }
        }

        #[test]
        fn generation_is_deterministic(t in terms_strategy()) {
            prop_assert_eq!(generate_schedule(&t).unwrap(), generate_schedule(&t).unwrap());
        }
    }
}
