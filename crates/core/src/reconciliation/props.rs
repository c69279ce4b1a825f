//! Property-based tests for reconciliation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::checker::ReconciliationChecker;
use super::types::ReconciliationOutcome;

fn cents(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A value always reconciles with itself.
    #[test]
    fn prop_identity_matches(value in cents(-10_000_000..10_000_000)) {
        prop_assert!(ReconciliationChecker::check(value, value, Decimal::ZERO).is_match());
    }

    /// Swapping the operands flips the sign of the delta, never the verdict.
    #[test]
    fn prop_symmetric_verdict(
        a in cents(0..1_000_000),
        b in cents(0..1_000_000),
        tolerance in cents(0..100),
    ) {
        let forward = ReconciliationChecker::check(a, b, tolerance);
        let backward = ReconciliationChecker::check(b, a, tolerance);
        prop_assert_eq!(forward.is_match(), backward.is_match());
        if let (Some(f), Some(r)) = (forward.delta(), backward.delta()) {
            prop_assert_eq!(f, -r);
        }
    }

    /// A mismatch delta is exactly `actual - expected`.
    #[test]
    fn prop_delta_is_actual_minus_expected(
        expected in cents(0..1_000_000),
        actual in cents(0..1_000_000),
    ) {
        match ReconciliationChecker::check(expected, actual, Decimal::new(1, 2)) {
            ReconciliationOutcome::Match => {
                prop_assert!((actual - expected).abs() <= Decimal::new(2, 2));
            }
            ReconciliationOutcome::Mismatch { delta } => prop_assert_eq!(delta, actual - expected),
        }
    }
}
