//! Aggregation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerStatus;
use crate::period::CompetencePeriod;

/// Dimension to group line items by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Client or supplier.
    Counterpart,
    /// Competence period.
    Period,
    /// Lifecycle status.
    Status,
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "counterpart" => Ok(Self::Counterpart),
            "period" => Ok(Self::Period),
            "status" => Ok(Self::Status),
            _ => Err(format!("Unknown grouping: {s}")),
        }
    }
}

/// Key of one aggregated group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "lowercase")]
pub enum GroupKey {
    /// Normalized counterpart name.
    Counterpart(String),
    /// Competence period.
    Period(CompetencePeriod),
    /// Lifecycle status.
    Status(LedgerStatus),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Counterpart(name) => write!(f, "{name}"),
            Self::Period(period) => write!(f, "{period}"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

/// Count and sum for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateGroup {
    /// Group key.
    pub key: GroupKey,
    /// Number of line items.
    pub count: usize,
    /// Sum of principal values.
    pub sum: Decimal,
}

impl AggregateGroup {
    /// Percentage of `denominator` this group's sum represents.
    ///
    /// The denominator is always supplied by the caller. Returns `None` when
    /// it is zero or so small that the percentage is out of `Decimal` range.
    #[must_use]
    pub fn share_of(&self, denominator: Decimal) -> Option<Decimal> {
        self.sum
            .checked_div(denominator)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Result of an aggregation, ordered by sum descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Dimension the groups are keyed on.
    pub group_by: GroupBy,
    /// Groups, highest sum first; ties keep first-encounter order.
    pub groups: Vec<AggregateGroup>,
    /// Line items left out because their competence could not be resolved.
    pub unparsed: usize,
    /// Line items left out by the exclusion set.
    pub excluded: usize,
}

impl Aggregation {
    /// Sum over the reported groups.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.groups.iter().map(|g| g.sum).sum()
    }

    /// Number of line items across the reported groups.
    #[must_use]
    pub fn count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// The first `n` groups.
    #[must_use]
    pub fn top(&self, n: usize) -> &[AggregateGroup] {
        &self.groups[..n.min(self.groups.len())]
    }

    /// Looks a group up by key.
    #[must_use]
    pub fn group(&self, key: &GroupKey) -> Option<&AggregateGroup> {
        self.groups.iter().find(|g| &g.key == key)
    }

    /// Returns true if no group was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
