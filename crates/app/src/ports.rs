//! Port definitions: traits that adapters and sibling registries implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod directory;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{DeviceDirectory, TechnicianDirectory};
pub use storage::{DeviceRepository, HospitalRepository, ServiceRepository, TechnicianRepository};
