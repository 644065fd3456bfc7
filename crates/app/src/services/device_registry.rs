//! Device registry: hospitals and the devices registered to them.

use std::future::Future;

use medtrack_domain::device::{Device, NewDevice};
use medtrack_domain::error::{ConflictError, LedgerError, NotFoundError};
use medtrack_domain::hospital::Hospital;
use medtrack_domain::id::{DeviceId, HospitalId};
use medtrack_domain::principal::Principal;
use medtrack_domain::status::DeviceStatus;

use crate::access_control::AccessControl;
use crate::ports::{DeviceDirectory, DeviceRepository, HospitalRepository};
use crate::write_gate::WriteGate;

/// Application service for hospital and device registration.
pub struct DeviceRegistry<H, D> {
    hospitals: H,
    devices: D,
    access: AccessControl,
    gate: WriteGate,
}

impl<H: HospitalRepository, D: DeviceRepository> DeviceRegistry<H, D> {
    /// Create a new registry backed by the given repositories.
    pub fn new(hospitals: H, devices: D, access: AccessControl, gate: WriteGate) -> Self {
        Self {
            hospitals,
            devices,
            access,
            gate,
        }
    }

    /// Register a hospital under its caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::Conflict`] when the id is taken, or a storage error.
    #[tracing::instrument(skip(self, hospital), fields(hospital_id = %hospital.id))]
    pub async fn register_hospital(
        &self,
        hospital: Hospital,
        caller: &Principal,
    ) -> Result<Hospital, LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        if self.hospitals.get_by_id(hospital.id).await?.is_some() {
            return Err(ConflictError {
                entity: "Hospital",
                id: hospital.id.to_string(),
            }
            .into());
        }
        let hospital = self.hospitals.insert(hospital).await?;
        tracing::debug!(name = %hospital.name, "hospital registered");
        Ok(hospital)
    }

    /// Register a device against an existing hospital and return its new id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the hospital does not exist, or a
    /// storage error.
    #[tracing::instrument(
        skip(self, device),
        fields(device_name = %device.name, hospital_id = %device.hospital_id)
    )]
    pub async fn register_device(
        &self,
        device: NewDevice,
        caller: &Principal,
    ) -> Result<DeviceId, LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        if self.hospitals.get_by_id(device.hospital_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Hospital",
                id: device.hospital_id.to_string(),
            }
            .into());
        }
        let device = self.devices.create(device).await?;
        tracing::debug!(device_id = %device.id, "device registered");
        Ok(device.id)
    }

    /// Overwrite the status of a device, keeping every other attribute.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the device does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_device_status(
        &self,
        id: DeviceId,
        status: DeviceStatus,
        caller: &Principal,
    ) -> Result<(), LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let mut device = self.devices.get_by_id(id).await?.ok_or_else(|| {
            LedgerError::from(NotFoundError {
                entity: "Device",
                id: id.to_string(),
            })
        })?;
        device.status = status;
        self.devices.update(device).await?;
        tracing::debug!("device status updated");
        Ok(())
    }

    /// Look up a device.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_device(&self, id: DeviceId) -> Result<Option<Device>, LedgerError> {
        self.devices.get_by_id(id).await
    }

    /// Look up a hospital.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_hospital(&self, id: HospitalId) -> Result<Option<Hospital>, LedgerError> {
        self.hospitals.get_by_id(id).await
    }

    /// Devices registered to a hospital, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices_for_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Vec<Device>, LedgerError> {
        self.devices.find_by_hospital(hospital_id).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn device_count(&self) -> Result<u64, LedgerError> {
        self.devices.count().await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn hospital_count(&self) -> Result<u64, LedgerError> {
        self.hospitals.count().await
    }
}

impl<H, D: DeviceRepository> DeviceDirectory for DeviceRegistry<H, D> {
    fn find_device(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LedgerError>> + Send {
        self.devices.get_by_id(id)
    }
}
