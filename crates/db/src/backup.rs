//! Backup inspection.
//!
//! Opens a backup copy of the store and summarizes what it holds, so the
//! operator can compare it against the live database before trusting it.

use std::path::{Path, PathBuf};

use finledger_core::aggregate::{Aggregation, Aggregator, GroupBy};
use finledger_core::ledger::{EntryKind, ExclusionSet, LedgerFilter};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Serialize;
use tracing::info;

use crate::repositories::{
    LedgerRepository, LedgerStoreError, VehicleRepository, VehicleStoreError, table_name,
};

/// Error types for backup inspection.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// The backup file does not exist. Nothing was created.
    #[error("Backup not found: {}", .0.display())]
    Missing(PathBuf),

    /// The backup could not be opened or read.
    #[error("Backup unreadable: {0}")]
    Unavailable(String),
}

impl From<LedgerStoreError> for BackupError {
    fn from(err: LedgerStoreError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<VehicleStoreError> for BackupError {
    fn from(err: VehicleStoreError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<sea_orm::DbErr> for BackupError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Row counts and status breakdown of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    /// Receivable rows.
    pub receivables: u64,
    /// Payable rows.
    pub payables: u64,
    /// Receivables grouped by status.
    pub receivable_status: Aggregation,
    /// Payables grouped by status.
    pub payable_status: Aggregation,
    /// Active support vehicles.
    pub vehicles: u64,
}

/// A table whose row count differs between two reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountDifference {
    /// Table name.
    pub table: &'static str,
    /// Rows in the backup.
    pub backup: u64,
    /// Rows in the live store.
    pub live: u64,
}

impl BackupReport {
    /// Tables whose counts differ from `live`.
    #[must_use]
    pub fn compare(&self, live: &Self) -> Vec<CountDifference> {
        [
            (table_name(EntryKind::Receivable), self.receivables, live.receivables),
            (table_name(EntryKind::Payable), self.payables, live.payables),
            ("veiculos_suporte", self.vehicles, live.vehicles),
        ]
        .into_iter()
        .filter(|(_, backup, live)| backup != live)
        .map(|(table, backup, live)| CountDifference { table, backup, live })
        .collect()
    }
}

/// Service for inspecting backup files.
pub struct BackupInspector;

impl BackupInspector {
    /// Opens a backup file read-only.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Missing`] before connecting if the file does not
    /// exist, so a mistyped path never creates an empty database.
    pub async fn open(path: &Path) -> Result<DatabaseConnection, BackupError> {
        if !path.is_file() {
            return Err(BackupError::Missing(path.to_path_buf()));
        }

        let url = format!("sqlite://{}?mode=ro", path.display());
        let mut options = ConnectOptions::new(url);
        options.max_connections(1).sqlx_logging(false);

        Ok(Database::connect(options).await?)
    }

    /// Summarizes the store behind `db`.
    ///
    /// # Errors
    ///
    /// Returns an error if any table cannot be read.
    pub async fn inspect(db: &DatabaseConnection) -> Result<BackupReport, BackupError> {
        let ledger = LedgerRepository::new(db.clone());
        let vehicles = VehicleRepository::new(db.clone());
        let no_exclusions = ExclusionSet::new();

        let receivables = ledger.query(EntryKind::Receivable, &LedgerFilter::all()).await?.entries;
        let payables = ledger.query(EntryKind::Payable, &LedgerFilter::all()).await?.entries;

        let report = BackupReport {
            receivables: receivables.len() as u64,
            payables: payables.len() as u64,
            receivable_status: Aggregator::aggregate(&receivables, GroupBy::Status, &no_exclusions),
            payable_status: Aggregator::aggregate(&payables, GroupBy::Status, &no_exclusions),
            vehicles: vehicles.count_active().await?,
        };

        info!(
            receivables = report.receivables,
            payables = report.payables,
            vehicles = report.vehicles,
            "Inspected store"
        );
        Ok(report)
    }
}
