//! Core business logic for Finledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, parsing rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Receivable/payable line items, status, counterparts, filters
//! - `period` - Competence period and date resolution
//! - `aggregate` - Grouped count/sum rankings
//! - `reconciliation` - Tolerance-based checks of derived totals
//! - `vehicle` - Vehicle classification lookup results
//! - `summary` - Revenue, expense and margin summary

pub mod aggregate;
pub mod ledger;
pub mod period;
pub mod reconciliation;
pub mod summary;
pub mod vehicle;
