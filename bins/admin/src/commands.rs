//! Subcommand implementations.
//!
//! Each command returns the process exit code on success. Store and input
//! failures come back as [`AppError`] so `main` can map them to exit codes.

use std::process::ExitCode;

use finledger_core::aggregate::{Aggregation, Aggregator, GroupBy};
use finledger_core::ledger::{EntryKind, ExclusionSet, LedgerFilter, LedgerStatus};
use finledger_core::period::CompetencePeriod;
use finledger_core::reconciliation::{ReconciliationChecker, ReconciliationOutcome};
use finledger_core::summary::{FinancialSummary, SummaryRequest};
use finledger_core::vehicle::VehicleInfo;
use finledger_db::migration::{Migrator, MigratorTrait};
use finledger_db::{BackupInspector, LedgerRepository, VehicleRepository, connect};
use finledger_shared::types::Money;
use finledger_shared::{AppConfig, AppError};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{MigrateAction, OutputFormat};

/// Exit code reported when a check ran but found a discrepancy.
const EXIT_DISCREPANCY: u8 = 1;

/// Shared settings for every command.
///
/// The store is opened on demand, so commands that never touch it (such as
/// `reconcile`) do not create a database file.
pub struct Context {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl Context {
    /// Opens the configured store.
    pub async fn connect(&self) -> Result<DatabaseConnection, AppError> {
        let db = connect(&self.config.database)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(url = %self.config.database.url, "Connected to database");
        Ok(db)
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<(), AppError> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                println!("{json}");
            }
            OutputFormat::Text => println!("{}", text()),
        }
        Ok(())
    }
}

pub async fn clear(ctx: &Context, kind: EntryKind, confirmed: bool) -> Result<ExitCode, AppError> {
    if !confirmed {
        return Err(AppError::ConfirmationRequired(format!(
            "clearing {kind} entries is irreversible; pass --yes"
        )));
    }

    let outcome = LedgerRepository::new(ctx.connect().await?).clear(kind).await?;

    #[derive(Serialize)]
    struct Cleared {
        kind: EntryKind,
        rows_deleted: u64,
    }
    ctx.emit(
        &Cleared {
            kind: outcome.kind,
            rows_deleted: outcome.rows_deleted,
        },
        || format!("Cleared {} {kind} entries; next id is 1", outcome.rows_deleted),
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Arguments of the ranking command.
pub struct RankingArgs {
    pub kind: EntryKind,
    pub group_by: GroupBy,
    pub status: Option<LedgerStatus>,
    pub period: Option<CompetencePeriod>,
    pub exclude: Vec<String>,
    pub denominator: Option<Decimal>,
    pub limit: usize,
}

#[derive(Serialize)]
struct Ranking {
    groups: Vec<RankingRow>,
    /// Entries left out because their competence could not be resolved.
    unparsed: usize,
}

#[derive(Serialize)]
struct RankingRow {
    rank: usize,
    key: String,
    count: usize,
    sum: Decimal,
    share: Option<Decimal>,
}

pub async fn ranking(ctx: &Context, args: RankingArgs) -> Result<ExitCode, AppError> {
    let exclude: ExclusionSet = args.exclude.iter().collect();

    let mut filter = LedgerFilter::all().excluding_all(&exclude);
    if let Some(status) = args.status {
        filter = filter.with_status(status);
    }
    if let Some(period) = args.period {
        filter = filter.in_period(period);
    }

    let query = LedgerRepository::new(ctx.connect().await?)
        .query(args.kind, &filter)
        .await?;
    let aggregation = Aggregator::aggregate(&query.entries, args.group_by, &exclude);
    let unparsed = query.unparsed + aggregation.unparsed;
    if unparsed > 0 {
        warn!(unparsed, "Entries with unparseable competence left out");
    }

    let denominator = args.denominator.unwrap_or_else(|| aggregation.total());
    let ranking = Ranking {
        groups: ranking_rows(&aggregation, denominator, args.limit),
        unparsed,
    };

    ctx.emit(&ranking, || render_ranking(&ranking, &aggregation, denominator))?;
    Ok(ExitCode::SUCCESS)
}

fn ranking_rows(aggregation: &Aggregation, denominator: Decimal, limit: usize) -> Vec<RankingRow> {
    aggregation
        .top(limit)
        .iter()
        .enumerate()
        .map(|(i, group)| RankingRow {
            rank: i + 1,
            key: group.key.to_string(),
            count: group.count,
            sum: group.sum,
            share: group
                .share_of(denominator)
                .map(|s| s.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        })
        .collect()
}

fn render_ranking(ranking: &Ranking, aggregation: &Aggregation, denominator: Decimal) -> String {
    let mut out = format!(
        "{:>3}  {:<40} {:>6} {:>18} {:>8}\n",
        "#", "KEY", "COUNT", "SUM", "SHARE"
    );
    for row in &ranking.groups {
        let share = row.share.map_or_else(|| "-".to_string(), |s| format!("{s}%"));
        out.push_str(&format!(
            "{:>3}  {:<40} {:>6} {:>18} {:>8}\n",
            row.rank,
            row.key,
            row.count,
            Money::new(row.sum).to_string(),
            share
        ));
    }
    out.push_str(&format!(
        "Total: {} in {} groups; share against {}",
        Money::new(aggregation.total()),
        aggregation.groups.len(),
        Money::new(denominator)
    ));
    if aggregation.excluded > 0 {
        out.push_str(&format!("\nExcluded entries: {}", aggregation.excluded));
    }
    if ranking.unparsed > 0 {
        out.push_str(&format!("\nUnparsed competence: {}", ranking.unparsed));
    }
    out
}

pub async fn summary(
    ctx: &Context,
    period: Option<CompetencePeriod>,
    exclude_suppliers: &[String],
    exclude_clients: &[String],
) -> Result<ExitCode, AppError> {
    let mut request = SummaryRequest::new();
    request.period = period;
    for name in ctx.config.reporting.excluded_suppliers.iter().chain(exclude_suppliers) {
        request.excluded_suppliers.insert(name);
    }
    for name in exclude_clients {
        request.excluded_clients.insert(name);
    }

    let repo = LedgerRepository::new(ctx.connect().await?);
    let receivables = repo
        .query(EntryKind::Receivable, &request.receivable_filter())
        .await?;
    let payables = repo
        .query(EntryKind::Payable, &request.payable_filter())
        .await?;
    let unparsed = receivables.unparsed + payables.unparsed;
    if unparsed > 0 {
        warn!(unparsed, "Settled entries with unparseable competence left out");
    }

    let summary = FinancialSummary::compute(&receivables.entries, &payables.entries, &request);
    let report = SummaryReport {
        summary: &summary,
        unparsed,
    };
    ctx.emit(&report, || render_summary(&report))?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    #[serde(flatten)]
    summary: &'a FinancialSummary,
    /// Settled entries left out because their competence could not be resolved.
    unparsed: usize,
}

fn render_summary(report: &SummaryReport<'_>) -> String {
    let mut out = report.summary.to_string();
    if report.unparsed > 0 {
        out.push_str(&format!("\nUnparsed competence: {}", report.unparsed));
    }
    out
}

pub fn reconcile(
    ctx: &Context,
    expected: Decimal,
    actual: Decimal,
    tolerance: Option<Decimal>,
) -> Result<ExitCode, AppError> {
    let tolerance = tolerance.unwrap_or(ctx.config.reporting.reconciliation_tolerance);
    if tolerance.is_sign_negative() {
        return Err(AppError::Validation("tolerance must not be negative".to_string()));
    }

    let outcome = ReconciliationChecker::check(expected, actual, tolerance);
    ctx.emit(&outcome, || outcome.to_string())?;

    Ok(match outcome {
        ReconciliationOutcome::Match => ExitCode::SUCCESS,
        ReconciliationOutcome::Mismatch { .. } => ExitCode::from(EXIT_DISCREPANCY),
    })
}

#[derive(Serialize)]
struct PlateInfo<'a> {
    plate: &'a str,
    #[serde(flatten)]
    info: &'a VehicleInfo,
}

pub async fn lookup(ctx: &Context, plates: &[String]) -> Result<ExitCode, AppError> {
    let repo = VehicleRepository::new(ctx.connect().await?);

    let results: Vec<(String, VehicleInfo)> = if let [plate] = plates {
        vec![(finledger_core::vehicle::normalize_plate(plate), repo.lookup(plate).await?)]
    } else {
        let found = repo.lookup_many(plates).await?;
        plates
            .iter()
            .map(|p| {
                let plate = finledger_core::vehicle::normalize_plate(p);
                let info = found.get(&plate).cloned().unwrap_or_default();
                (plate, info)
            })
            .collect()
    };

    let rows: Vec<PlateInfo<'_>> = results
        .iter()
        .map(|(plate, info)| PlateInfo { plate, info })
        .collect();
    ctx.emit(&rows, || {
        results
            .iter()
            .map(|(plate, info)| {
                format!(
                    "{plate:<10} {:<12} {}",
                    info.typology.as_deref().unwrap_or("-"),
                    info.profile.as_deref().unwrap_or("-")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(ExitCode::SUCCESS)
}

pub async fn verify_backup(ctx: &Context, path: &std::path::Path) -> Result<ExitCode, AppError> {
    let backup = BackupInspector::open(path).await?;
    let backup_report = BackupInspector::inspect(&backup).await?;
    let live_report = BackupInspector::inspect(&ctx.connect().await?).await?;
    let differences = backup_report.compare(&live_report);

    #[derive(Serialize)]
    struct Verification<'a> {
        backup: &'a finledger_db::BackupReport,
        differences: &'a [finledger_db::CountDifference],
    }
    ctx.emit(
        &Verification {
            backup: &backup_report,
            differences: &differences,
        },
        || {
            let mut out = format!(
                "Backup {}: {} receivables, {} payables, {} active vehicles",
                path.display(),
                backup_report.receivables,
                backup_report.payables,
                backup_report.vehicles
            );
            for group in &backup_report.receivable_status.groups {
                out.push_str(&format!("\n  receivable {:<14} {:>6}", group.key, group.count));
            }
            for group in &backup_report.payable_status.groups {
                out.push_str(&format!("\n  payable    {:<14} {:>6}", group.key, group.count));
            }
            if differences.is_empty() {
                out.push_str("\nRow counts match the live store");
            }
            for d in &differences {
                out.push_str(&format!("\n  {}: backup {} / live {}", d.table, d.backup, d.live));
            }
            out
        },
    )?;

    if differences.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DISCREPANCY))
    }
}

pub async fn migrate(ctx: &Context, action: MigrateAction) -> Result<ExitCode, AppError> {
    let db = &ctx.connect().await?;
    let result = match action {
        MigrateAction::Up => Migrator::up(db, None).await,
        MigrateAction::Down => Migrator::down(db, Some(1)).await,
        MigrateAction::Status => Migrator::status(db).await,
        MigrateAction::Fresh => Migrator::fresh(db).await,
    };
    result.map_err(|e| AppError::Database(e.to_string()))?;
    info!(?action, "Migration finished");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finledger_core::ledger::{LedgerEntry, LedgerStatus};
    use rust_decimal_macros::dec;

    fn entry(counterpart: &str, value: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: 1,
            kind: EntryKind::Payable,
            counterpart: counterpart.to_string(),
            principal_value: value,
            status: LedgerStatus::Settled,
            status_label: "Pago".to_string(),
            competence: Some("9/2025".to_string()),
            issue_date: None,
            due_date: None,
            original_due_date: None,
            settlement_date: None,
            liquidation_date: None,
            accounting_account: None,
            payment_bank: None,
            payment_account: None,
            payment_method: None,
            notes: None,
        }
    }

    #[test]
    fn test_ranking_rows_use_given_denominator() {
        let entries = vec![entry("A", dec!(300)), entry("B", dec!(100))];
        let aggregation =
            Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());

        let rows = ranking_rows(&aggregation, dec!(1000), 10);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].key, "A");
        assert_eq!(rows[0].share, Some(dec!(30)));
        assert_eq!(rows[1].share, Some(dec!(10)));
    }

    #[test]
    fn test_ranking_rows_zero_denominator_has_no_share() {
        let entries = vec![entry("A", dec!(300))];
        let aggregation =
            Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());

        let rows = ranking_rows(&aggregation, Decimal::ZERO, 10);

        assert_eq!(rows[0].share, None);
    }

    #[test]
    fn test_render_ranking_mentions_total_and_exclusions() {
        let entries = vec![entry("A", dec!(300)), entry("REIS TRANSPORTES", dec!(900))];
        let exclude: ExclusionSet = ["REIS TRANSPORTES"].into_iter().collect();
        let aggregation = Aggregator::aggregate(&entries, GroupBy::Counterpart, &exclude);
        let ranking = Ranking {
            groups: ranking_rows(&aggregation, aggregation.total(), 10),
            unparsed: 0,
        };

        let text = render_ranking(&ranking, &aggregation, aggregation.total());

        assert!(text.contains("R$ 300,00"));
        assert!(text.contains("100%"));
        assert!(text.contains("Excluded entries: 1"));
        assert!(!text.contains("REIS"));
        assert!(!text.contains("Unparsed"));
    }

    #[test]
    fn test_ranking_reports_unparsed_entries() {
        let entries = vec![entry("A", dec!(300))];
        let aggregation =
            Aggregator::aggregate(&entries, GroupBy::Counterpart, &ExclusionSet::new());
        let ranking = Ranking {
            groups: ranking_rows(&aggregation, aggregation.total(), 10),
            unparsed: 2,
        };

        let text = render_ranking(&ranking, &aggregation, aggregation.total());
        let json = serde_json::to_value(&ranking).unwrap();

        assert!(text.contains("Unparsed competence: 2"));
        assert_eq!(json["unparsed"], 2);
        assert_eq!(json["groups"][0]["key"], "A");
    }

    #[test]
    fn test_summary_report_keeps_summary_keys_and_adds_unparsed() {
        let summary = FinancialSummary::from_totals(dec!(200), dec!(50));
        let report = SummaryReport {
            summary: &summary,
            unparsed: 3,
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["receita_total"], "200");
        assert_eq!(json["unparsed"], 3);
        assert!(render_summary(&report).ends_with("Unparsed competence: 3"));
    }

    fn context(url: String) -> Context {
        let mut config = AppConfig::default();
        config.database.url = url;
        Context {
            config,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_reconcile_never_opens_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("financeiro.db");
        let ctx = context(format!("sqlite://{}?mode=rwc", path.display()));

        let code = reconcile(&ctx, dec!(450.00), dec!(450.00), None).unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("financeiro.db");
        let ctx = context(format!("sqlite://{}?mode=ro", path.display()));

        let err = ctx.connect().await.unwrap_err();

        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
        assert_eq!(err.exit_code(), 4);
    }
}
