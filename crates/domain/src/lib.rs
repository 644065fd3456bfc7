//! # medtrack-domain
//!
//! Pure domain model for the medical-device lifecycle ledger.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, the error taxonomy, timestamps,
//!   caller identity
//! - Define **Hospitals** and the **Devices** registered against them
//! - Define **Technicians** and their per-device-type **Qualifications**
//! - Define **Service orders**, their status lifecycle, and the immutable
//!   **history entries** produced on completion
//! - Contain the record-level invariants (state-machine preconditions,
//!   one-way verification, qualification rules)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod principal;
pub mod status;
pub mod time;

pub mod device;
pub mod hospital;
pub mod qualification;
pub mod service_history;
pub mod service_order;
pub mod technician;
