//! Property-based tests for period resolution.

use proptest::prelude::*;

use super::error::PeriodError;
use super::resolver::{CompetencePeriod, resolve};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every valid `M/YYYY` label resolves to exactly the pair it encodes.
    #[test]
    fn prop_month_year_label_resolves_exactly(year in 1000i32..=9999, month in 1u32..=12) {
        let label = format!("{month}/{year}");
        prop_assert_eq!(resolve(&label), Ok(CompetencePeriod { year, month }));
    }

    /// Zero-padded months resolve to the same pair.
    #[test]
    fn prop_padded_month_resolves_exactly(year in 1000i32..=9999, month in 1u32..=12) {
        let label = format!("{month:02}/{year}");
        prop_assert_eq!(resolve(&label), Ok(CompetencePeriod { year, month }));
    }

    /// Display output feeds back into the resolver unchanged.
    #[test]
    fn prop_display_is_resolvable(year in 1000i32..=9999, month in 1u32..=12) {
        let period = CompetencePeriod { year, month };
        prop_assert_eq!(resolve(&period.to_string()), Ok(period));
    }

    /// Text without any recognizable separator never resolves.
    #[test]
    fn prop_no_separator_is_unparseable(raw in "[A-Za-z0-9 ]{0,16}") {
        prop_assert_eq!(resolve(&raw), Err(PeriodError::Unparseable(raw.clone())));
    }

    /// Arbitrary input never panics.
    #[test]
    fn prop_resolve_never_panics(raw in "\\PC{0,24}") {
        let _ = resolve(&raw);
    }
}
