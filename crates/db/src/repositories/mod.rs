//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod ledger;
pub mod vehicle;

pub use ledger::{ClearOutcome, LedgerRepository, LedgerStoreError, table_name};
pub use vehicle::{VehicleRepository, VehicleStoreError};
