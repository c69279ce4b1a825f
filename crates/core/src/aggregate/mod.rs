//! Grouped count/sum rankings over ledger line items.
//!
//! Rankings are always presented highest value first. Percentages divide
//! by a denominator the caller passes in; the aggregation's own total is
//! never substituted for it.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::Aggregator;
pub use types::{AggregateGroup, Aggregation, GroupBy, GroupKey};
