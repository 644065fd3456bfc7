//! # medtrackd
//!
//! Loads configuration, initialises logging, opens the ledger database
//! (running pending migrations) and reports what it holds.

use medtrack_app::ports::SystemClock;
use medtrack_ledger::Ledger;
use medtrack_ledger::config::LedgerConfig;
use medtrack_ledger::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = LedgerConfig::load()?;
    telemetry::init_logging(&config.logging.filter);

    let ledger = Ledger::open(&config, SystemClock).await?;
    let summary = ledger.summary().await?;

    tracing::info!(
        database = config.database_url(),
        authority = %config.authority(),
        hospitals = summary.hospitals,
        devices = summary.devices,
        technicians = summary.technicians,
        services = summary.services,
        "ledger ready"
    );

    Ok(())
}
