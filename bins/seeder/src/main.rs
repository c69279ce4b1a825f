//! Database seeder for Finledger development and testing.
//!
//! Seeds sample receivables, payables and support vehicles for local
//! development. Tables that already hold rows are left alone.
//!
//! Usage: cargo run --bin seeder

use finledger_core::ledger::{EntryKind, NewLedgerEntry};
use finledger_core::vehicle::{NewVehicle, VehicleProfile};
use finledger_db::migration::{Migrator, MigratorTrait};
use finledger_db::{LedgerRepository, VehicleRepository};
use finledger_shared::AppConfig;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// (client, amount in cents, status, competence, due date, settlement date)
const RECEIVABLES: [(&str, i64, &str, &str, &str, Option<&str>); 8] = [
    ("MINERVA FOODS", 4_850_000, "Recebido", "9/2025", "10/09/2025", Some("10/09/2025")),
    ("MINERVA FOODS", 3_920_050, "Recebido", "9/2025", "25/09/2025", Some("26/09/2025")),
    ("JBS", 2_775_000, "Recebido", "9/2025", "15/09/2025", Some("15/09/2025")),
    ("JBS", 1_200_000, "Pendente", "9/2025", "30/09/2025", None),
    ("MARFRIG", 1_980_000, "Recebido", "9/2025", "20/09/2025", Some("22/09/2025")),
    ("MARFRIG", 950_000, "Recebido", "8/2025", "20/08/2025", Some("20/08/2025")),
    ("FRIGOL", 640_000, "Em aberto", "10/2025", "10/10/2025", None),
    ("FRIGOL", 310_000, "Cancelado", "9/2025", "12/09/2025", None),
];

/// (supplier, amount in cents, status, competence, due date, settlement date)
const PAYABLES: [(&str, i64, &str, &str, &str, Option<&str>); 7] = [
    ("POSTO IPIRANGA BR-163", 1_845_000, "Pago", "9/2025", "05/09/2025", Some("05/09/2025")),
    ("POSTO IPIRANGA BR-163", 1_310_000, "Pago", "9/2025", "20/09/2025", Some("19/09/2025")),
    ("OFICINA DIESEL SUL", 720_000, "Pago", "9/2025", "12/09/2025", Some("12/09/2025")),
    ("REIS TRANSPORTES", 2_500_000, "Pago", "9/2025", "15/09/2025", Some("15/09/2025")),
    ("PNEUS NORTE", 480_000, "Pendente", "9/2025", "30/09/2025", None),
    ("OFICINA DIESEL SUL", 215_000, "Pago", "8/2025", "18/08/2025", Some("18/08/2025")),
    ("SEGURADORA FROTA", 390_000, "A pagar", "10/2025", "10/10/2025", None),
];

/// (plate, typology, profile)
const VEHICLES: [(&str, &str, VehicleProfile); 4] = [
    ("ABC1D23", "TRUCK", VehicleProfile::Fixo),
    ("QWE4R56", "CARRETA", VehicleProfile::Fixo),
    ("RTY7U89", "TOCO", VehicleProfile::Spot),
    ("FGH2J34", "CARRETA", VehicleProfile::Spot),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finledger=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    info!(url = %config.database.url, "Connecting to database");
    let db = finledger_db::connect(&config.database).await?;
    Migrator::up(&db, None).await?;

    let ledger = LedgerRepository::new(db.clone());
    seed_ledger(&ledger, EntryKind::Receivable, &RECEIVABLES).await?;
    seed_ledger(&ledger, EntryKind::Payable, &PAYABLES).await?;
    seed_vehicles(&VehicleRepository::new(db)).await?;

    info!("Seeding complete");
    Ok(())
}

/// Seeds one ledger table unless it already holds rows.
async fn seed_ledger(
    repo: &LedgerRepository,
    kind: EntryKind,
    rows: &[(&str, i64, &str, &str, &str, Option<&str>)],
) -> anyhow::Result<()> {
    if repo.count(kind).await? > 0 {
        info!(%kind, "Ledger already seeded, skipping");
        return Ok(());
    }

    let entries = rows
        .iter()
        .map(|&(counterpart, cents, status, competence, due, settled)| {
            let mut entry = NewLedgerEntry::new(counterpart, Decimal::new(cents, 2), status)
                .with_competence(competence)
                .with_due_date(due);
            entry.issue_date = Some(due.to_string());
            entry.settlement_date = settled.map(str::to_string);
            entry.liquidation_date = settled.map(str::to_string);
            entry
        })
        .collect();

    let inserted = repo.insert_batch(kind, entries).await?;
    info!(%kind, inserted, "Seeded ledger");
    Ok(())
}

/// Seeds support vehicles unless any are registered.
async fn seed_vehicles(repo: &VehicleRepository) -> anyhow::Result<()> {
    if repo.count_active().await? > 0 {
        info!("Vehicles already seeded, skipping");
        return Ok(());
    }

    for (plate, typology, profile) in VEHICLES {
        repo.register(NewVehicle::new(plate, typology, profile)?)
            .await?;
    }

    info!(vehicles = VEHICLES.len(), "Seeded vehicles");
    Ok(())
}
