//! Application services: the three registries.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Every mutating method checks [`AccessControl`](crate::access_control::AccessControl)
//! first, then runs inside the shared [`WriteGate`](crate::write_gate::WriteGate).

pub mod device_registry;
pub mod service_scheduler;
pub mod technician_registry;
