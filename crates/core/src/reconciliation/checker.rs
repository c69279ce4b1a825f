//! Tolerance-based reconciliation of derived totals against stored totals.

use rust_decimal::Decimal;

use super::types::{ExpenseLine, LineMismatch, ReconciliationOutcome, ReconciliationReport};

/// Default absolute tolerance: one cent.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Service for comparing two independently derived monetary values.
pub struct ReconciliationChecker;

impl ReconciliationChecker {
    /// Compares `actual` against `expected`.
    ///
    /// The comparison is on the absolute difference, never a relative one.
    /// Each side may carry up to `tolerance` of rounding error, so the two
    /// agree while `|actual - expected| <= 2 * tolerance`. A mismatch
    /// reports the signed delta `actual - expected`.
    #[must_use]
    pub fn check(expected: Decimal, actual: Decimal, tolerance: Decimal) -> ReconciliationOutcome {
        let delta = actual - expected;
        let band = tolerance.abs() * Decimal::TWO;
        if delta.abs() <= band {
            ReconciliationOutcome::Match
        } else {
            ReconciliationOutcome::Mismatch { delta }
        }
    }

    /// [`Self::check`] with [`DEFAULT_TOLERANCE`].
    #[must_use]
    pub fn check_default(expected: Decimal, actual: Decimal) -> ReconciliationOutcome {
        Self::check(expected, actual, DEFAULT_TOLERANCE)
    }

    /// Checks a composite derived from its components against the stored total.
    ///
    /// The expected value is the sum of `components`; the stored total is the
    /// actual value, so a positive delta means the store holds more.
    #[must_use]
    pub fn check_composite(
        components: &[Decimal],
        stored_total: Decimal,
        tolerance: Decimal,
    ) -> ReconciliationOutcome {
        let derived: Decimal = components.iter().sum();
        Self::check(derived, stored_total, tolerance)
    }

    /// Checks a batch of general-expense lines (vale + custo vs. stored).
    ///
    /// Lines whose components sum to zero or less carry no expense and are
    /// skipped, not counted as checked.
    #[must_use]
    pub fn reconcile_expense_lines(
        lines: &[ExpenseLine],
        tolerance: Decimal,
    ) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();

        for line in lines {
            if line.derived_total() <= Decimal::ZERO {
                report.skipped += 1;
                continue;
            }
            report.checked += 1;
            match Self::check_composite(&[line.vale, line.custo], line.stored_total, tolerance) {
                ReconciliationOutcome::Match => report.matched += 1,
                ReconciliationOutcome::Mismatch { delta } => report.mismatches.push(LineMismatch {
                    reference: line.reference.clone(),
                    derived: line.derived_total(),
                    stored: line.stored_total,
                    delta,
                }),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_tolerance_is_one_cent() {
        assert_eq!(DEFAULT_TOLERANCE, dec!(0.01));
    }

    #[rstest]
    #[case(dec!(100.00), dec!(100.00), dec!(0.01))]
    #[case(dec!(100.00), dec!(100.02), dec!(0.01))]
    #[case(dec!(100.02), dec!(100.00), dec!(0.01))]
    #[case(dec!(100.00), dec!(100.002), dec!(0.001))]
    fn test_within_tolerance_matches(
        #[case] expected: Decimal,
        #[case] actual: Decimal,
        #[case] tolerance: Decimal,
    ) {
        assert_eq!(
            ReconciliationChecker::check(expected, actual, tolerance),
            ReconciliationOutcome::Match
        );
    }

    #[test]
    fn test_tight_tolerance_reports_delta() {
        assert_eq!(
            ReconciliationChecker::check(dec!(100.00), dec!(100.02), dec!(0.001)),
            ReconciliationOutcome::Mismatch { delta: dec!(0.02) }
        );
    }

    #[test]
    fn test_delta_is_signed() {
        assert_eq!(
            ReconciliationChecker::check(dec!(100.00), dec!(99.00), dec!(0.01)),
            ReconciliationOutcome::Mismatch { delta: dec!(-1.00) }
        );
    }

    #[test]
    fn test_comparison_is_absolute_not_relative() {
        // 0.1% of a large total would pass a relative check.
        assert!(
            ReconciliationChecker::check(dec!(1000000.00), dec!(1000001.00), dec!(0.01))
                .is_mismatch()
        );
    }

    #[test]
    fn test_composite_general_expenses() {
        let components = [dec!(150.00), dec!(300.00)];
        assert_eq!(
            ReconciliationChecker::check_composite(&components, dec!(450.00), DEFAULT_TOLERANCE),
            ReconciliationOutcome::Match
        );
        assert_eq!(
            ReconciliationChecker::check_composite(&components, dec!(450.50), dec!(0.01)),
            ReconciliationOutcome::Mismatch { delta: dec!(0.50) }
        );
    }

    #[test]
    fn test_check_default() {
        assert!(ReconciliationChecker::check_default(dec!(10), dec!(10.01)).is_match());
        assert!(ReconciliationChecker::check_default(dec!(10), dec!(10.10)).is_mismatch());
    }

    #[test]
    fn test_reconcile_expense_lines() {
        let lines = vec![
            ExpenseLine::new("2", dec!(150.00), dec!(300.00), dec!(450.00)),
            ExpenseLine::new("3", dec!(0), dec!(0), dec!(12.00)),
            ExpenseLine::new("4", dec!(150.00), dec!(300.00), dec!(450.50)),
            ExpenseLine::new("5", dec!(80.00), dec!(0), dec!(80.00)),
        ];

        let report = ReconciliationChecker::reconcile_expense_lines(&lines, DEFAULT_TOLERANCE);

        assert_eq!(report.checked, 3);
        assert_eq!(report.matched, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.mismatches.len(), 1);
        let mismatch = &report.mismatches[0];
        assert_eq!(mismatch.reference, "4");
        assert_eq!(mismatch.derived, dec!(450.00));
        assert_eq!(mismatch.stored, dec!(450.50));
        assert_eq!(mismatch.delta, dec!(0.50));
        assert!(!report.is_clean());
    }
}
