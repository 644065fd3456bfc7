//! # medtrack-app
//!
//! Application layer: the three registries and their **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HospitalRepository`, `DeviceRepository`: device registration store
//!   - `TechnicianRepository`: technicians and qualifications
//!   - `ServiceRepository`: service orders and completion history
//!   - `Clock`: host-supplied logical time
//! - Define the **read-only directories** one registry exposes to another
//!   (`DeviceDirectory`, `TechnicianDirectory`)
//! - Provide the registry use-cases:
//!   - `DeviceRegistry`: hospitals and devices
//!   - `TechnicianRegistry`: technicians, qualifications, `is_qualified`
//!   - `ServiceScheduler`: scheduling, status transitions, completion
//! - Gate every mutation behind `AccessControl` and the shared `WriteGate`
//!
//! ## Dependency rule
//! Depends on `medtrack-domain` only (plus `tokio::sync` for the write gate).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//! `ServiceScheduler` sees the other registries only through the directory
//! ports; neither of them ever calls back into it.

pub mod access_control;
pub mod ports;
pub mod services;
pub mod write_gate;
