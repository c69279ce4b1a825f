//! Period resolution errors.

use thiserror::Error;

/// Errors that can occur while resolving a competence period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The input matches none of the recognized period or date forms.
    #[error("Unparseable period: {0:?}")]
    Unparseable(String),
}
