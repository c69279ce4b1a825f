//! Counterpart name normalization and exclusion sets.

use std::collections::BTreeSet;

/// Normalizes a client or supplier name for comparison.
///
/// Upper-cases, trims, turns non-breaking spaces into spaces and collapses
/// runs of whitespace, so `"  Reis  Transportes\u{a0}"` and
/// `"REIS TRANSPORTES"` compare equal.
#[must_use]
pub fn normalize_counterpart(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Set of counterparts to leave out of a query or aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a counterpart name.
    pub fn insert(&mut self, name: &str) {
        let normalized = normalize_counterpart(name);
        if !normalized.is_empty() {
            self.names.insert(normalized);
        }
    }

    /// Returns true if the counterpart is excluded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.names.is_empty() && self.names.contains(&normalize_counterpart(name))
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of excluded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Normalized names, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_counterpart() {
        assert_eq!(normalize_counterpart("  Reis  Transportes "), "REIS TRANSPORTES");
        assert_eq!(normalize_counterpart("MINERVA\u{a0}S/A"), "MINERVA S/A");
        assert_eq!(normalize_counterpart(""), "");
    }

    #[test]
    fn test_exclusion_matches_normalized_names() {
        let set: ExclusionSet = ["REIS TRANSPORTES"].into_iter().collect();
        assert!(set.contains("reis transportes"));
        assert!(set.contains(" Reis\u{a0}Transportes"));
        assert!(!set.contains("REIS TRANSPORTES LTDA"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let set: ExclusionSet = ["", "   "].into_iter().collect();
        assert!(set.is_empty());
        assert!(!set.contains(""));
    }
}
