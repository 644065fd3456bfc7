//! Service scheduler: service orders, their status lifecycle, and the
//! completion history.
//!
//! `scheduled --update_service_status--> in-progress --complete_service--> completed`
//!
//! [`ServiceScheduler::update_service_status`] is the generic transition
//! primitive and accepts any status. [`ServiceScheduler::complete_service`]
//! is the only path that writes history, and it requires `in-progress`.
//!
//! Scheduling checks that the device and the technician exist. It does not
//! check that the technician is qualified for the device.

use medtrack_domain::error::{LedgerError, NotFoundError};
use medtrack_domain::id::{DeviceId, ServiceId};
use medtrack_domain::principal::Principal;
use medtrack_domain::service_history::{ServiceCompletion, ServiceHistoryEntry};
use medtrack_domain::service_order::{NewServiceOrder, ServiceOrder};
use medtrack_domain::status::ServiceStatus;

use crate::access_control::AccessControl;
use crate::ports::{Clock, DeviceDirectory, ServiceRepository, TechnicianDirectory};
use crate::write_gate::WriteGate;

/// Application service for scheduling and completing device service.
pub struct ServiceScheduler<S, D, T, C> {
    repo: S,
    devices: D,
    technicians: T,
    clock: C,
    access: AccessControl,
    gate: WriteGate,
}

fn service_not_found(id: ServiceId) -> LedgerError {
    NotFoundError {
        entity: "ServiceOrder",
        id: id.to_string(),
    }
    .into()
}

impl<S, D, T, C> ServiceScheduler<S, D, T, C>
where
    S: ServiceRepository,
    D: DeviceDirectory,
    T: TechnicianDirectory,
    C: Clock,
{
    /// Create a new scheduler.
    ///
    /// `devices` and `technicians` are read-only views of the sibling
    /// registries; `gate` must be the one those registries use.
    pub fn new(
        repo: S,
        devices: D,
        technicians: T,
        clock: C,
        access: AccessControl,
        gate: WriteGate,
    ) -> Self {
        Self {
            repo,
            devices,
            technicians,
            clock,
            access,
            gate,
        }
    }

    /// Schedule a service for an existing device and technician; return the
    /// new service id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the device or the technician does not
    /// exist, or a storage error.
    #[tracing::instrument(
        skip(self, order),
        fields(device_id = %order.device_id, technician_id = %order.technician_id)
    )]
    pub async fn schedule_service(
        &self,
        order: NewServiceOrder,
        caller: &Principal,
    ) -> Result<ServiceId, LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        if self.devices.find_device(order.device_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Device",
                id: order.device_id.to_string(),
            }
            .into());
        }
        if self
            .technicians
            .find_technician(order.technician_id)
            .await?
            .is_none()
        {
            return Err(NotFoundError {
                entity: "Technician",
                id: order.technician_id.to_string(),
            }
            .into());
        }
        let order = self.repo.create(order).await?;
        tracing::debug!(service_id = %order.id, "service scheduled");
        Ok(order.id)
    }

    /// Overwrite the status of a service order with any value.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the order does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_service_status(
        &self,
        id: ServiceId,
        status: ServiceStatus,
        caller: &Principal,
    ) -> Result<(), LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let mut order = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| service_not_found(id))?;
        tracing::debug!(from = %order.status, to = %status, "service status changed");
        order.status = status;
        self.repo.update(order).await?;
        Ok(())
    }

    /// Complete an in-progress service: set its status to `completed` and
    /// record the history entry stamped with the current clock, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the order does not exist,
    /// [`LedgerError::InvalidState`] unless its status is exactly
    /// `in-progress` or when a history entry was already recorded for it,
    /// or a storage error.
    #[tracing::instrument(skip(self, completion))]
    pub async fn complete_service(
        &self,
        id: ServiceId,
        completion: ServiceCompletion,
        caller: &Principal,
    ) -> Result<ServiceHistoryEntry, LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let mut order = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| service_not_found(id))?;
        order.ensure_completable()?;
        if self.repo.get_history(order.device_id, id).await?.is_some() {
            return Err(ServiceHistoryEntry::already_recorded(order.device_id, id).into());
        }

        let entry = completion.into_entry(&order, self.clock.now());
        order.status = ServiceStatus::Completed;
        let entry = self.repo.record_completion(order, entry).await?;
        tracing::debug!(
            device_id = %entry.device_id,
            completion_date = entry.completion_date,
            "service completed"
        );
        Ok(entry)
    }

    /// Look up a service order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_service(&self, id: ServiceId) -> Result<Option<ServiceOrder>, LedgerError> {
        self.repo.get_by_id(id).await
    }

    /// Look up the history entry of a completed service.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_service_history(
        &self,
        device_id: DeviceId,
        service_id: ServiceId,
    ) -> Result<Option<ServiceHistoryEntry>, LedgerError> {
        self.repo.get_history(device_id, service_id).await
    }

    /// Every completed service of a device, ordered by service id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_service_history(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<ServiceHistoryEntry>, LedgerError> {
        self.repo.find_history_by_device(device_id).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn service_count(&self) -> Result<u64, LedgerError> {
        self.repo.count().await
    }
}
