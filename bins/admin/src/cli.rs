//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use finledger_core::aggregate::GroupBy;
use finledger_core::ledger::{EntryKind, LedgerStatus};
use finledger_core::period::CompetencePeriod;
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "finledger", version, about = "Ledger queries, reconciliation and maintenance")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete every row of one ledger table and reset its id sequence
    #[command(after_help = "\
This is irreversible. Take a backup first and pass --yes to confirm.

Examples:
  finledger clear --kind receivable --yes")]
    Clear {
        /// Ledger table to clear (receivable or payable)
        #[arg(long)]
        kind: EntryKind,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Rank counterparts, periods or statuses by total value
    #[command(after_help = "\
Examples:
  finledger ranking --kind payable --status settled --period 9/2025 --limit 10
  finledger ranking --kind payable --exclude 'REIS TRANSPORTES' --denominator 125000
  finledger ranking --kind receivable --group-by period")]
    Ranking {
        /// Ledger table to rank (receivable or payable)
        #[arg(long, default_value = "payable")]
        kind: EntryKind,

        /// Dimension to group by (counterpart, period or status)
        #[arg(long, default_value = "counterpart")]
        group_by: GroupBy,

        /// Only this status (open, settled, cancelled, unrecognized)
        #[arg(long)]
        status: Option<LedgerStatus>,

        /// Only this competence period (e.g. 9/2025)
        #[arg(long)]
        period: Option<CompetencePeriod>,

        /// Counterpart to leave out. Repeatable.
        #[arg(long, value_name = "NAME")]
        exclude: Vec<String>,

        /// Denominator for the share column (defaults to the ranking's own total)
        #[arg(long)]
        denominator: Option<Decimal>,

        /// Number of groups to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Revenue, expenses and margin of settled line items
    Summary {
        /// Only this competence period (e.g. 9/2025)
        #[arg(long)]
        period: Option<CompetencePeriod>,

        /// Supplier to leave out of expenses. Repeatable; adds to the configured list.
        #[arg(long, value_name = "NAME")]
        exclude_supplier: Vec<String>,

        /// Client to leave out of revenue. Repeatable.
        #[arg(long, value_name = "NAME")]
        exclude_client: Vec<String>,
    },

    /// Compare two independently derived totals (exit 1 on mismatch)
    #[command(after_help = "\
The pair matches when |actual - expected| <= 2 x tolerance, so the default
0.01 accepts differences up to 0.02.

Examples:
  finledger reconcile --expected 450.00 --actual 450.50
  finledger reconcile --expected 100 --actual 100.02 --tolerance 0.001")]
    Reconcile {
        /// Value derived from components
        #[arg(long, allow_hyphen_values = true)]
        expected: Decimal,

        /// Stored value
        #[arg(long, allow_hyphen_values = true)]
        actual: Decimal,

        /// Absolute tolerance (defaults to the configured one). Totals match
        /// when they differ by at most twice this value.
        #[arg(long)]
        tolerance: Option<Decimal>,
    },

    /// Look up the typology and profile of support vehicles
    Lookup {
        /// Plates to look up
        #[arg(required = true)]
        plates: Vec<String>,
    },

    /// Compare a backup file against the live store (exit 1 on difference)
    VerifyBackup {
        /// Path to the backup SQLite file
        path: PathBuf,
    },

    /// Run schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and re-run every migration
    Fresh,
}
