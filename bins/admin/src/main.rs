//! Finledger operator CLI.
//!
//! Main entry point for querying, reconciling and maintaining the ledger
//! store. Logs go to stderr so `--format json` output stays clean.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use commands::{Context, RankingArgs};
use finledger_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("error: {err}");
            exit_code(&err)
        }
    }
}

async fn execute(cli: Cli) -> Result<ExitCode, AppError> {
    let ctx = Context {
        config: AppConfig::load()?,
        format: cli.format,
    };
    run(&ctx, cli.command).await
}

async fn run(ctx: &Context, command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Clear { kind, yes } => commands::clear(ctx, kind, yes).await,
        Command::Ranking {
            kind,
            group_by,
            status,
            period,
            exclude,
            denominator,
            limit,
        } => {
            commands::ranking(
                ctx,
                RankingArgs {
                    kind,
                    group_by,
                    status,
                    period,
                    exclude,
                    denominator,
                    limit,
                },
            )
            .await
        }
        Command::Summary {
            period,
            exclude_supplier,
            exclude_client,
        } => commands::summary(ctx, period, &exclude_supplier, &exclude_client).await,
        Command::Reconcile {
            expected,
            actual,
            tolerance,
        } => commands::reconcile(ctx, expected, actual, tolerance),
        Command::Lookup { plates } => commands::lookup(ctx, &plates).await,
        Command::VerifyBackup { path } => commands::verify_backup(ctx, &path).await,
        Command::Migrate { action } => commands::migrate(ctx, action).await,
    }
}

fn exit_code(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
