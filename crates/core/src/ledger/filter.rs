//! Ledger query filters.
//!
//! A filter is a conjunction of optional predicates. An empty filter matches
//! every line item, whatever its status; callers computing received or paid
//! totals must set [`LedgerFilter::with_status`] explicitly.

use chrono::NaiveDate;
use thiserror::Error;

use super::counterpart::{ExclusionSet, normalize_counterpart};
use super::status::LedgerStatus;
use super::types::{DateField, LedgerEntry};
use crate::period::CompetencePeriod;

/// Errors building a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Range start falls after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Inclusive range over one date column. Open ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Column the range applies to.
    pub field: DateField,
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDateRange`] when `from` is after `to`.
    pub fn new(
        field: DateField,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, FilterError> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(FilterError::InvalidDateRange { start, end });
            }
        }
        Ok(Self { field, from, to })
    }

    /// Returns true if the entry's date falls in the range.
    ///
    /// An absent or unparseable date never matches.
    #[must_use]
    pub fn contains(&self, entry: &LedgerEntry) -> bool {
        let Some(date) = entry.date(self.field) else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Conjunction of ledger predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Only this counterpart (normalized comparison).
    pub counterpart: Option<String>,
    /// Never these counterparts.
    pub exclude: ExclusionSet,
    /// Only this status.
    pub status: Option<LedgerStatus>,
    /// Only this competence period. Unparseable competences never match.
    pub period: Option<CompetencePeriod>,
    /// Only dates inside this range.
    pub date_range: Option<DateRange>,
}

impl LedgerFilter {
    /// Filter that matches everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one counterpart.
    #[must_use]
    pub fn with_counterpart(mut self, name: &str) -> Self {
        self.counterpart = Some(normalize_counterpart(name));
        self
    }

    /// Leaves a counterpart out.
    #[must_use]
    pub fn excluding(mut self, name: &str) -> Self {
        self.exclude.insert(name);
        self
    }

    /// Leaves every counterpart in the set out.
    #[must_use]
    pub fn excluding_all(mut self, names: &ExclusionSet) -> Self {
        for name in names.iter() {
            self.exclude.insert(name);
        }
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: LedgerStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to settled line items.
    #[must_use]
    pub fn settled(self) -> Self {
        self.with_status(LedgerStatus::Settled)
    }

    /// Restricts to one competence period.
    #[must_use]
    pub fn in_period(mut self, period: CompetencePeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// Restricts to a date range.
    #[must_use]
    pub fn within(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Returns true if no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counterpart.is_none()
            && self.exclude.is_empty()
            && self.status.is_none()
            && self.period.is_none()
            && self.date_range.is_none()
    }

    /// Returns true if the entry satisfies every predicate.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.verdict(entry) == FilterVerdict::Selected
    }

    /// Classifies an entry against the filter.
    ///
    /// An entry that passes every other predicate but whose competence
    /// cannot be resolved for the period predicate is [`FilterVerdict::Unparsed`].
    #[must_use]
    pub fn verdict(&self, entry: &LedgerEntry) -> FilterVerdict {
        if let Some(counterpart) = &self.counterpart {
            if normalize_counterpart(&entry.counterpart) != *counterpart {
                return FilterVerdict::Rejected;
            }
        }
        if self.exclude.contains(&entry.counterpart)
            || self.status.is_some_and(|status| entry.status != status)
            || self.date_range.is_some_and(|range| !range.contains(entry))
        {
            return FilterVerdict::Rejected;
        }
        match self.period {
            None => FilterVerdict::Selected,
            Some(period) => match entry.competence_period() {
                Ok(resolved) if resolved == period => FilterVerdict::Selected,
                Ok(_) => FilterVerdict::Rejected,
                Err(_) => FilterVerdict::Unparsed,
            },
        }
    }

    /// Keeps the selected entries, in order, and tallies the unparsed ones.
    #[must_use]
    pub fn apply<I>(&self, entries: I) -> LedgerQuery
    where
        I: IntoIterator<Item = LedgerEntry>,
    {
        let mut query = LedgerQuery::default();
        for entry in entries {
            match self.verdict(&entry) {
                FilterVerdict::Selected => query.entries.push(entry),
                FilterVerdict::Unparsed => query.unparsed += 1,
                FilterVerdict::Rejected => {}
            }
        }
        query
    }
}

/// Outcome of testing one entry against a [`LedgerFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Every predicate holds.
    Selected,
    /// Some predicate rules the entry out.
    Rejected,
    /// Left out only because its competence could not be resolved.
    Unparsed,
}

/// Entries selected by a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerQuery {
    /// Selected entries, in store order.
    pub entries: Vec<LedgerEntry>,
    /// Entries left out only because their competence could not be
    /// resolved against the period predicate.
    pub unparsed: usize,
}
