//! Property-based tests for the aggregator.
//!
//! - Output is sorted by sum descending
//! - Equal sums keep first-encounter order
//! - Excluded counterparts contribute nothing anywhere

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::Aggregator;
use super::tests::entry;
use super::types::{GroupBy, GroupKey};
use crate::ledger::{ExclusionSet, LedgerEntry, LedgerStatus};

const NAMES: [&str; 6] = ["ALFA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT"];

/// Strategy for positive amounts in cents (0.01 to 10,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for ledgers drawn from a small name pool, so groups collide.
fn ledger_strategy() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec((0usize..NAMES.len(), amount_strategy()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(i, value)| entry(NAMES[i], value, LedgerStatus::Settled, Some("9/2025")))
            .collect()
    })
}

/// Strategy for ledgers where every amount is one of two values, so ties are common.
fn tied_ledger_strategy() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec(0usize..NAMES.len(), 1..NAMES.len()).prop_map(|picks| {
        let mut seen = Vec::new();
        for i in picks {
            if !seen.contains(&i) {
                seen.push(i);
            }
        }
        seen.into_iter()
            .enumerate()
            .map(|(n, i)| {
                let value = if n % 2 == 0 { Decimal::TEN } else { Decimal::ONE_HUNDRED };
                entry(NAMES[i], value, LedgerStatus::Settled, Some("9/2025"))
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Groups come out highest sum first.
    #[test]
    fn prop_sorted_by_sum_descending(entries in ledger_strategy()) {
        let result = Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());
        for pair in result.groups.windows(2) {
            prop_assert!(pair[0].sum >= pair[1].sum);
        }
    }

    /// Groups with equal sums keep the order their counterparts first appeared in.
    #[test]
    fn prop_ties_are_stable(entries in tied_ledger_strategy()) {
        let result = Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());
        let first_seen = |key: &GroupKey| {
            entries.iter().position(|e| GroupKey::Counterpart(e.counterpart.clone()) == *key)
        };
        for pair in result.groups.windows(2) {
            if pair[0].sum == pair[1].sum {
                prop_assert!(first_seen(&pair[0].key) < first_seen(&pair[1].key));
            }
        }
    }

    /// An excluded counterpart yields no group and its values appear in no sum.
    #[test]
    fn prop_exclusion_never_redistributes(
        entries in ledger_strategy(),
        excluded_idx in 0usize..NAMES.len(),
    ) {
        let excluded_name = NAMES[excluded_idx];
        let exclude: ExclusionSet = [excluded_name].into_iter().collect();

        let kept_total: Decimal = entries
            .iter()
            .filter(|e| e.counterpart != excluded_name)
            .map(|e| e.principal_value)
            .sum();
        let excluded_count = entries.iter().filter(|e| e.counterpart == excluded_name).count();

        for group_by in [GroupBy::Counterpart, GroupBy::Status, GroupBy::Period] {
            let result = Aggregator::aggregate(&entries, group_by, &exclude);
            prop_assert!(result.group(&GroupKey::Counterpart(excluded_name.to_string())).is_none());
            prop_assert_eq!(result.total(), kept_total);
            prop_assert_eq!(result.excluded, excluded_count);
        }
    }

    /// Nothing is lost: every non-excluded entry lands in exactly one group.
    #[test]
    fn prop_counts_are_conserved(entries in ledger_strategy()) {
        let result = Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());
        prop_assert_eq!(result.count(), entries.len());
        let input_total: Decimal = entries.iter().map(|e| e.principal_value).sum();
        prop_assert_eq!(result.total(), input_total);
    }
}
