//! # medtrack-ledger
//!
//! Composition root: wires the `SQLite` adapter into the three registries
//! and hands them out as one [`Ledger`].
//!
//! The registries share a single [`AccessControl`] authority and a single
//! [`WriteGate`], so a mutation in one registry is never interleaved with a
//! mutation in another.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use medtrack_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteDeviceRepository, SqliteHospitalRepository,
    SqliteServiceRepository, SqliteTechnicianRepository,
};
use medtrack_app::access_control::AccessControl;
use medtrack_app::ports::{Clock, SystemClock};
use medtrack_app::services::device_registry::DeviceRegistry;
use medtrack_app::services::service_scheduler::ServiceScheduler;
use medtrack_app::services::technician_registry::TechnicianRegistry;
use medtrack_app::write_gate::WriteGate;
use medtrack_domain::error::LedgerError;

use crate::config::LedgerConfig;

/// Device registry backed by `SQLite`.
pub type LedgerDeviceRegistry = DeviceRegistry<SqliteHospitalRepository, SqliteDeviceRepository>;

/// Technician registry backed by `SQLite`.
pub type LedgerTechnicianRegistry = TechnicianRegistry<SqliteTechnicianRepository>;

/// Service scheduler backed by `SQLite`, reading devices and technicians
/// through the sibling registries.
pub type LedgerServiceScheduler<C> = ServiceScheduler<
    SqliteServiceRepository,
    Arc<LedgerDeviceRegistry>,
    Arc<LedgerTechnicianRegistry>,
    C,
>;

/// The three registries over one database.
pub struct Ledger<C = SystemClock> {
    devices: Arc<LedgerDeviceRegistry>,
    technicians: Arc<LedgerTechnicianRegistry>,
    scheduler: LedgerServiceScheduler<C>,
}

/// Record counts across the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    pub hospitals: u64,
    pub devices: u64,
    pub technicians: u64,
    pub services: u64,
}

impl<C: Clock> Ledger<C> {
    /// Connect to the configured database, run migrations and build the
    /// registries under the configured authority.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the database cannot be opened or
    /// migrated.
    pub async fn open(config: &LedgerConfig, clock: C) -> Result<Self, LedgerError> {
        let db = StorageConfig {
            database_url: config.database_url().to_string(),
        }
        .build()
        .await?;
        let pool = db.pool().clone();

        let access = AccessControl::new(config.authority());
        let gate = WriteGate::new();

        let devices = Arc::new(DeviceRegistry::new(
            SqliteHospitalRepository::new(pool.clone()),
            SqliteDeviceRepository::new(pool.clone()),
            access.clone(),
            gate.clone(),
        ));
        let technicians = Arc::new(TechnicianRegistry::new(
            SqliteTechnicianRepository::new(pool.clone()),
            access.clone(),
            gate.clone(),
        ));
        let scheduler = ServiceScheduler::new(
            SqliteServiceRepository::new(pool),
            Arc::clone(&devices),
            Arc::clone(&technicians),
            clock,
            access,
            gate,
        );

        tracing::debug!(authority = %config.authority(), "ledger opened");

        Ok(Self {
            devices,
            technicians,
            scheduler,
        })
    }

    #[must_use]
    pub fn devices(&self) -> &LedgerDeviceRegistry {
        &self.devices
    }

    #[must_use]
    pub fn technicians(&self) -> &LedgerTechnicianRegistry {
        &self.technicians
    }

    #[must_use]
    pub fn scheduler(&self) -> &LedgerServiceScheduler<C> {
        &self.scheduler
    }

    /// Count the records held by each registry.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any count query fails.
    pub async fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        Ok(LedgerSummary {
            hospitals: self.devices.hospital_count().await?,
            devices: self.devices.device_count().await?,
            technicians: self.technicians.technician_count().await?,
            services: self.scheduler.service_count().await?,
        })
    }
}
