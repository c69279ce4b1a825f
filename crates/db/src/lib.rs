//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the SQLite ledger schema
//! - Repository abstractions for data access
//! - Database migrations
//! - Backup inspection

pub mod backup;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use backup::{BackupError, BackupInspector, BackupReport, CountDifference};
pub use repositories::{
    ClearOutcome, LedgerRepository, LedgerStoreError, VehicleRepository, VehicleStoreError,
};

use finledger_shared::AppError;
use finledger_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}

impl From<LedgerStoreError> for AppError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::Unavailable(e) => Self::Database(e.to_string()),
            LedgerStoreError::InvalidInput(msg) => Self::Validation(msg),
        }
    }
}

impl From<VehicleStoreError> for AppError {
    fn from(err: VehicleStoreError) -> Self {
        match err {
            VehicleStoreError::Unavailable(e) => Self::Database(e.to_string()),
            VehicleStoreError::InvalidInput(e) => Self::Validation(e.to_string()),
        }
    }
}

impl From<BackupError> for AppError {
    fn from(err: BackupError) -> Self {
        match err {
            BackupError::Missing(_) => Self::NotFound(err.to_string()),
            BackupError::Unavailable(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_store_errors_map_to_store_unavailable() {
        let err: AppError = LedgerStoreError::Unavailable(DbErr::Custom("locked".into())).into();
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
        let err: AppError = VehicleStoreError::Unavailable(DbErr::Custom("locked".into())).into();
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_invalid_input_maps_to_validation() {
        let err: AppError =
            LedgerStoreError::InvalidInput("client must not be empty".into()).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_missing_backup_maps_to_not_found() {
        let err: AppError = BackupError::Missing(PathBuf::from("/tmp/nope.db")).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("nope.db"));
    }
}
