//! # medtrack-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `medtrack-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain records and database rows
//!
//! Auto-assigned ids come from `AUTOINCREMENT` sequences, which `SQLite`
//! never reuses and only advances on a committed insert.
//!
//! ## Dependency rule
//! Depends on `medtrack-app` (for port traits) and `medtrack-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod device_repo;
pub mod error;
pub mod hospital_repo;
pub mod pool;
pub mod service_repo;
pub mod technician_repo;

mod sql;

pub use device_repo::SqliteDeviceRepository;
pub use hospital_repo::SqliteHospitalRepository;
pub use pool::{Config, Database};
pub use service_repo::SqliteServiceRepository;
pub use technician_repo::SqliteTechnicianRepository;
