//! Service order: a maintenance or repair task linking a device and a
//! technician.

use serde::{Deserialize, Serialize};

use crate::error::InvalidStateError;
use crate::id::{DeviceId, ServiceId, TechnicianId};
use crate::status::ServiceStatus;
use crate::time::Timestamp;

/// A scheduled service.
///
/// Device and technician existed when the order was scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub id: ServiceId,
    pub device_id: DeviceId,
    pub technician_id: TechnicianId,
    pub scheduled_date: Timestamp,
    pub service_type: String,
    pub notes: String,
    pub status: ServiceStatus,
}

impl ServiceOrder {
    /// Check the completion precondition: status must be exactly
    /// `in-progress`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError`] carrying the current status otherwise.
    pub fn ensure_completable(&self) -> Result<(), InvalidStateError> {
        if self.status == ServiceStatus::InProgress {
            return Ok(());
        }
        Err(InvalidStateError {
            entity: "ServiceOrder",
            id: self.id.to_string(),
            expected: ServiceStatus::InProgress.to_string(),
            actual: self.status.to_string(),
        })
    }
}

/// Scheduling request for a service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceOrder {
    pub device_id: DeviceId,
    pub technician_id: TechnicianId,
    pub scheduled_date: Timestamp,
    pub service_type: String,
    pub notes: String,
}

impl NewServiceOrder {
    /// Create a builder for an order servicing `device_id` by `technician_id`.
    #[must_use]
    pub fn builder(device_id: DeviceId, technician_id: TechnicianId) -> NewServiceOrderBuilder {
        NewServiceOrderBuilder {
            device_id,
            technician_id,
            scheduled_date: 0,
            service_type: String::new(),
            notes: String::new(),
        }
    }

    /// Turn the request into a stored record: assigned `id`, status
    /// `scheduled`.
    #[must_use]
    pub fn into_order(self, id: ServiceId) -> ServiceOrder {
        ServiceOrder {
            id,
            device_id: self.device_id,
            technician_id: self.technician_id,
            scheduled_date: self.scheduled_date,
            service_type: self.service_type,
            notes: self.notes,
            status: ServiceStatus::Scheduled,
        }
    }
}

/// Step-by-step builder for [`NewServiceOrder`].
#[derive(Debug)]
pub struct NewServiceOrderBuilder {
    device_id: DeviceId,
    technician_id: TechnicianId,
    scheduled_date: Timestamp,
    service_type: String,
    notes: String,
}

impl NewServiceOrderBuilder {
    #[must_use]
    pub fn scheduled_date(mut self, scheduled_date: Timestamp) -> Self {
        self.scheduled_date = scheduled_date;
        self
    }

    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn build(self) -> NewServiceOrder {
        NewServiceOrder {
            device_id: self.device_id,
            technician_id: self.technician_id,
            scheduled_date: self.scheduled_date,
            service_type: self.service_type,
            notes: self.notes,
        }
    }
}
