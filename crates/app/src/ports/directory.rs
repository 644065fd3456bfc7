//! Directory ports: read-only views one registry exposes to another.
//!
//! The service scheduler validates device and technician references through
//! these traits instead of holding the other registries' repositories.

use std::future::Future;
use std::sync::Arc;

use medtrack_domain::device::Device;
use medtrack_domain::error::LedgerError;
use medtrack_domain::id::{DeviceId, TechnicianId};
use medtrack_domain::technician::Technician;

/// Read-only lookup of registered devices.
pub trait DeviceDirectory {
    fn find_device(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LedgerError>> + Send;
}

/// Read-only lookup of registered technicians.
pub trait TechnicianDirectory {
    fn find_technician(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, LedgerError>> + Send;
}

impl<T: DeviceDirectory + Send + Sync> DeviceDirectory for Arc<T> {
    fn find_device(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LedgerError>> + Send {
        (**self).find_device(id)
    }
}

impl<T: TechnicianDirectory + Send + Sync> TechnicianDirectory for Arc<T> {
    fn find_technician(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, LedgerError>> + Send {
        (**self).find_technician(id)
    }
}
