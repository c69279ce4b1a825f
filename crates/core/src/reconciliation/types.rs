//! Reconciliation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of comparing a derived value against a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ReconciliationOutcome {
    /// The values agree within tolerance.
    Match,
    /// The values disagree; `delta` is `actual - expected`.
    Mismatch {
        /// Signed difference.
        delta: Decimal,
    },
}

impl ReconciliationOutcome {
    /// Returns true if the values agreed.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Returns true if the values disagreed.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// Signed delta of a mismatch, `None` for a match.
    #[must_use]
    pub const fn delta(&self) -> Option<Decimal> {
        match self {
            Self::Match => None,
            Self::Mismatch { delta } => Some(*delta),
        }
    }
}

impl std::fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch { delta } if delta.is_sign_negative() => write!(f, "mismatch ({delta})"),
            Self::Mismatch { delta } => write!(f, "mismatch (+{delta})"),
        }
    }
}

/// One general-expense line: two components and the total stored beside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    /// Caller-chosen reference (sheet row, document number).
    pub reference: String,
    /// Advance paid ("vale").
    pub vale: Decimal,
    /// Direct cost ("custo").
    pub custo: Decimal,
    /// Total recorded for the line.
    pub stored_total: Decimal,
}

impl ExpenseLine {
    /// Creates an expense line.
    #[must_use]
    pub fn new(
        reference: impl Into<String>,
        vale: Decimal,
        custo: Decimal,
        stored_total: Decimal,
    ) -> Self {
        Self {
            reference: reference.into(),
            vale,
            custo,
            stored_total,
        }
    }

    /// Total derived from the components.
    #[must_use]
    pub fn derived_total(&self) -> Decimal {
        self.vale + self.custo
    }
}

/// A line that failed reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMismatch {
    /// Reference of the offending line.
    pub reference: String,
    /// Total derived from the components.
    pub derived: Decimal,
    /// Total stored for the line.
    pub stored: Decimal,
    /// `stored - derived`.
    pub delta: Decimal,
}

/// Summary of a batch reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Lines compared.
    pub checked: usize,
    /// Lines that agreed.
    pub matched: usize,
    /// Lines without any expense component.
    pub skipped: usize,
    /// Lines that disagreed, in input order.
    pub mismatches: Vec<LineMismatch>,
}

impl ReconciliationReport {
    /// Returns true if every checked line agreed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_accessors() {
        assert!(ReconciliationOutcome::Match.is_match());
        assert_eq!(ReconciliationOutcome::Match.delta(), None);
        let mismatch = ReconciliationOutcome::Mismatch { delta: dec!(-0.50) };
        assert!(mismatch.is_mismatch());
        assert_eq!(mismatch.delta(), Some(dec!(-0.50)));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ReconciliationOutcome::Match.to_string(), "match");
        assert_eq!(
            ReconciliationOutcome::Mismatch { delta: dec!(0.50) }.to_string(),
            "mismatch (+0.50)"
        );
        assert_eq!(
            ReconciliationOutcome::Mismatch { delta: dec!(-1.00) }.to_string(),
            "mismatch (-1.00)"
        );
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json =
            serde_json::to_value(ReconciliationOutcome::Mismatch { delta: dec!(0.02) }).unwrap();
        assert_eq!(json["outcome"], "mismatch");
        assert_eq!(json["delta"], "0.02");
        let json = serde_json::to_value(ReconciliationOutcome::Match).unwrap();
        assert_eq!(json["outcome"], "match");
    }

    #[test]
    fn test_empty_report_is_clean() {
        assert!(ReconciliationReport::default().is_clean());
    }
}
