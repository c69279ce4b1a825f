//! Competence period and date resolution.
//!
//! Competence labels and date columns arrive as free text in several
//! formats. Resolution never aborts: anything unrecognized comes back as
//! [`PeriodError::Unparseable`] so batch callers can tally it.

pub mod error;
pub mod resolver;

#[cfg(test)]
mod props;

pub use error::PeriodError;
pub use resolver::{CompetencePeriod, parse_date, resolve};
