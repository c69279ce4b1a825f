//! Period resolver.
//!
//! Recognized forms:
//! - `M/YYYY` and `MM/YYYY` competence labels (`9/2025`, `09/2025`)
//! - `DD/MM/YYYY` dates, optionally followed by a time
//! - `YYYY-MM-DD` dates, optionally followed by `T` or a space and a time
//! - `YYYY-MM` ISO months

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Canonical (year, month) key a line item is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetencePeriod {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl CompetencePeriod {
    /// Creates a period, returning `None` when the month is out of range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The period a calendar date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for CompetencePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl std::str::FromStr for CompetencePeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Resolves a competence label or date string into its (year, month) key.
///
/// # Errors
///
/// Returns [`PeriodError::Unparseable`] for any input that matches none of
/// the recognized forms, including out-of-range months.
pub fn resolve(raw: &str) -> Result<CompetencePeriod, PeriodError> {
    let unparseable = || PeriodError::Unparseable(raw.to_string());
    let trimmed = raw.trim();

    if let Some(date) = parse_date(trimmed) {
        return Ok(CompetencePeriod::from_date(date));
    }

    if let Some((month, year)) = trimmed.split_once('/') {
        return month_year(year, month).ok_or_else(unparseable);
    }

    if let Some((year, month)) = trimmed.split_once('-') {
        return month_year(year, month).ok_or_else(unparseable);
    }

    Err(unparseable())
}

/// Parses a full date string (`DD/MM/YYYY` or `YYYY-MM-DD`, with an
/// optional time suffix).
///
/// Returns `None` when the text is not a full date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or(trimmed);

    if date_part.matches('-').count() == 2 {
        return NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok();
    }
    if date_part.matches('/').count() == 2 {
        return NaiveDate::parse_from_str(date_part, "%d/%m/%Y").ok();
    }
    None
}

fn month_year(year: &str, month: &str) -> Option<CompetencePeriod> {
    let year = year.trim();
    let month = month.trim();

    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    let month_ok = (1..=2).contains(&month.len()) && month.bytes().all(|b| b.is_ascii_digit());
    if !year_ok || !month_ok {
        return None;
    }

    CompetencePeriod::new(year.parse().ok()?, month.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("9/2025", 2025, 9)]
    #[case("09/2025", 2025, 9)]
    #[case("12/2024", 2024, 12)]
    #[case(" 1/2026 ", 2026, 1)]
    #[case("2025-09-15", 2025, 9)]
    #[case("2025-09-15 00:00:00", 2025, 9)]
    #[case("2025-09-15T08:48:33", 2025, 9)]
    #[case("15/09/2025", 2025, 9)]
    #[case("5/3/2025", 2025, 3)]
    #[case("31/12/2024 23:59", 2024, 12)]
    #[case("2025-09", 2025, 9)]
    fn test_resolves_known_forms(#[case] raw: &str, #[case] year: i32, #[case] month: u32) {
        assert_eq!(resolve(raw), Ok(CompetencePeriod { year, month }));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("092025")]
    #[case("setembro")]
    #[case("13/2025")]
    #[case("0/2025")]
    #[case("9/25")]
    #[case("9/20255")]
    #[case("a/2025")]
    #[case("2025-13")]
    #[case("31/02/2025")]
    #[case("2025/09/15/1")]
    fn test_unparseable_forms(#[case] raw: &str) {
        assert_eq!(resolve(raw), Err(PeriodError::Unparseable(raw.to_string())));
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 17);
        assert_eq!(parse_date("2025-09-17"), expected);
        assert_eq!(parse_date("17/09/2025"), expected);
        assert_eq!(parse_date("2025-09-17 08:48:33"), expected);
        assert_eq!(parse_date("9/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_period_display_is_competence_label() {
        let period = CompetencePeriod::new(2025, 9).unwrap();
        assert_eq!(period.to_string(), "9/2025");
        assert_eq!("9/2025".parse::<CompetencePeriod>(), Ok(period));
    }

    #[test]
    fn test_period_new_rejects_bad_month() {
        assert!(CompetencePeriod::new(2025, 0).is_none());
        assert!(CompetencePeriod::new(2025, 13).is_none());
    }

    #[test]
    fn test_period_ordering() {
        let aug = CompetencePeriod::new(2025, 8).unwrap();
        let sep = CompetencePeriod::new(2025, 9).unwrap();
        let jan = CompetencePeriod::new(2026, 1).unwrap();
        assert!(aug < sep);
        assert!(sep < jan);
    }

    #[test]
    fn test_period_contains() {
        let sep = CompetencePeriod::new(2025, 9).unwrap();
        assert!(sep.contains(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()));
        assert!(!sep.contains(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()));
    }
}
