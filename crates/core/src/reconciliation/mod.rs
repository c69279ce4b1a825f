//! Reconciliation of independently derived totals.
//!
//! Compares a value derived from components (e.g. advance plus direct cost)
//! with the total stored beside them, allowing for rounding on both sides.

mod checker;
mod types;

#[cfg(test)]
mod props;

pub use checker::{DEFAULT_TOLERANCE, ReconciliationChecker};
pub use types::{ExpenseLine, LineMismatch, ReconciliationOutcome, ReconciliationReport};
