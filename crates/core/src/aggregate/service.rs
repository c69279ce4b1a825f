//! Aggregation service.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::types::{AggregateGroup, Aggregation, GroupBy, GroupKey};
use crate::ledger::{ExclusionSet, LedgerEntry, normalize_counterpart};

/// Service for grouping line items into count/sum rankings.
pub struct Aggregator;

impl Aggregator {
    /// Groups `entries` and ranks the groups by sum, highest first.
    ///
    /// Excluded counterparts are dropped before grouping, so they never
    /// contribute to any group. When grouping by period, entries whose
    /// competence cannot be resolved are tallied in `unparsed` instead of
    /// being grouped.
    #[must_use]
    pub fn aggregate(
        entries: &[LedgerEntry],
        group_by: GroupBy,
        exclude: &ExclusionSet,
    ) -> Aggregation {
        let mut groups: Vec<AggregateGroup> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut unparsed = 0;
        let mut excluded = 0;

        for entry in entries {
            if exclude.contains(&entry.counterpart) {
                excluded += 1;
                continue;
            }

            let key = match group_by {
                GroupBy::Counterpart => {
                    GroupKey::Counterpart(normalize_counterpart(&entry.counterpart))
                }
                GroupBy::Status => GroupKey::Status(entry.status),
                GroupBy::Period => match entry.competence_period() {
                    Ok(period) => GroupKey::Period(period),
                    Err(_) => {
                        unparsed += 1;
                        continue;
                    }
                },
            };

            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(AggregateGroup {
                    key,
                    count: 0,
                    sum: Decimal::ZERO,
                });
                groups.len() - 1
            });
            groups[slot].count += 1;
            groups[slot].sum += entry.principal_value;
        }

        // Stable: equal sums keep first-encounter order.
        groups.sort_by(|a, b| b.sum.cmp(&a.sum));

        Aggregation {
            group_by,
            groups,
            unparsed,
            excluded,
        }
    }
}
