//! Receivable and payable line items.
//!
//! This module implements the ledger domain:
//! - Line item types mirrored across receivables and payables
//! - Closed lifecycle status parsed from stored labels
//! - Counterpart normalization and exclusion
//! - Query filters

pub mod counterpart;
pub mod filter;
pub mod status;
pub mod types;

pub use counterpart::{ExclusionSet, normalize_counterpart};
pub use filter::{DateRange, FilterError, FilterVerdict, LedgerFilter, LedgerQuery};
pub use status::LedgerStatus;
pub use types::{DateField, EntryKind, LedgerEntry, NewLedgerEntry};
