//! Storage port: repository traits for persistence.
//!
//! Repositories that hand out identifiers assign the next id of their own
//! monotonic sequence inside `create`; a sequence value is only consumed
//! by an insert that actually commits.

use std::future::Future;

use medtrack_domain::device::{Device, NewDevice};
use medtrack_domain::error::LedgerError;
use medtrack_domain::hospital::Hospital;
use medtrack_domain::id::{DeviceId, HospitalId, ServiceId, TechnicianId};
use medtrack_domain::qualification::Qualification;
use medtrack_domain::service_history::ServiceHistoryEntry;
use medtrack_domain::service_order::{NewServiceOrder, ServiceOrder};
use medtrack_domain::technician::{NewTechnician, Technician};

/// Repository for [`Hospital`]s, keyed by their caller-chosen id.
pub trait HospitalRepository {
    /// Persist a new hospital.
    ///
    /// Fails with [`LedgerError::Conflict`] when the id is already taken.
    fn insert(
        &self,
        hospital: Hospital,
    ) -> impl Future<Output = Result<Hospital, LedgerError>> + Send;

    fn get_by_id(
        &self,
        id: HospitalId,
    ) -> impl Future<Output = Result<Option<Hospital>, LedgerError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send;
}

/// Repository for [`Device`]s.
pub trait DeviceRepository {
    /// Persist a new device under the next device id, with status `active`.
    fn create(&self, device: NewDevice)
    -> impl Future<Output = Result<Device, LedgerError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LedgerError>> + Send;

    /// Overwrite an existing device.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, LedgerError>> + Send;

    /// Devices registered to a hospital, ordered by id.
    fn find_by_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> impl Future<Output = Result<Vec<Device>, LedgerError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send;
}

/// Repository for [`Technician`]s and their [`Qualification`]s.
pub trait TechnicianRepository {
    /// Persist a new technician under the next technician id, with status
    /// `active`.
    fn create(
        &self,
        technician: NewTechnician,
    ) -> impl Future<Output = Result<Technician, LedgerError>> + Send;

    fn get_by_id(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, LedgerError>> + Send;

    /// Overwrite an existing technician.
    fn update(
        &self,
        technician: Technician,
    ) -> impl Future<Output = Result<Technician, LedgerError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send;

    /// Insert or overwrite the qualification for its
    /// `(technician_id, device_type)` key.
    fn save_qualification(
        &self,
        qualification: Qualification,
    ) -> impl Future<Output = Result<Qualification, LedgerError>> + Send;

    fn get_qualification(
        &self,
        technician_id: TechnicianId,
        device_type: &str,
    ) -> impl Future<Output = Result<Option<Qualification>, LedgerError>> + Send;

    /// All qualifications of a technician, ordered by device type.
    fn find_qualifications(
        &self,
        technician_id: TechnicianId,
    ) -> impl Future<Output = Result<Vec<Qualification>, LedgerError>> + Send;
}

/// Repository for [`ServiceOrder`]s and their [`ServiceHistoryEntry`]s.
pub trait ServiceRepository {
    /// Persist a new order under the next service id, with status `scheduled`.
    fn create(
        &self,
        order: NewServiceOrder,
    ) -> impl Future<Output = Result<ServiceOrder, LedgerError>> + Send;

    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<ServiceOrder>, LedgerError>> + Send;

    /// Overwrite an existing order.
    fn update(
        &self,
        order: ServiceOrder,
    ) -> impl Future<Output = Result<ServiceOrder, LedgerError>> + Send;

    /// Store the completed `order` and insert its history `entry` as one
    /// atomic write: either both are visible afterwards or neither is.
    fn record_completion(
        &self,
        order: ServiceOrder,
        entry: ServiceHistoryEntry,
    ) -> impl Future<Output = Result<ServiceHistoryEntry, LedgerError>> + Send;

    fn get_history(
        &self,
        device_id: DeviceId,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Option<ServiceHistoryEntry>, LedgerError>> + Send;

    /// History of a device, ordered by service id.
    fn find_history_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<ServiceHistoryEntry>, LedgerError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send;
}
