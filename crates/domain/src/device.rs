//! Device: a piece of medical equipment registered to a hospital.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, HospitalId};
use crate::status::DeviceStatus;
use crate::time::Timestamp;

/// A registered device.
///
/// `hospital_id` referenced an existing hospital when the device was
/// registered. Only `status` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub purchase_date: Timestamp,
    pub warranty_expiry: Timestamp,
    pub hospital_id: HospitalId,
    pub status: DeviceStatus,
}

/// Registration request for a device, before the registry assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub purchase_date: Timestamp,
    pub warranty_expiry: Timestamp,
    pub hospital_id: HospitalId,
}

impl NewDevice {
    /// Create a builder for a device registered to `hospital_id`.
    #[must_use]
    pub fn builder(hospital_id: HospitalId) -> NewDeviceBuilder {
        NewDeviceBuilder {
            name: String::new(),
            model: String::new(),
            serial_number: String::new(),
            manufacturer: String::new(),
            purchase_date: 0,
            warranty_expiry: 0,
            hospital_id,
        }
    }

    /// Turn the request into a stored record: assigned `id`, status `active`.
    #[must_use]
    pub fn into_device(self, id: DeviceId) -> Device {
        Device {
            id,
            name: self.name,
            model: self.model,
            serial_number: self.serial_number,
            manufacturer: self.manufacturer,
            purchase_date: self.purchase_date,
            warranty_expiry: self.warranty_expiry,
            hospital_id: self.hospital_id,
            status: DeviceStatus::Active,
        }
    }
}

/// Step-by-step builder for [`NewDevice`].
#[derive(Debug)]
pub struct NewDeviceBuilder {
    name: String,
    model: String,
    serial_number: String,
    manufacturer: String,
    purchase_date: Timestamp,
    warranty_expiry: Timestamp,
    hospital_id: HospitalId,
}

impl NewDeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    #[must_use]
    pub fn purchase_date(mut self, purchase_date: Timestamp) -> Self {
        self.purchase_date = purchase_date;
        self
    }

    #[must_use]
    pub fn warranty_expiry(mut self, warranty_expiry: Timestamp) -> Self {
        self.warranty_expiry = warranty_expiry;
        self
    }

    /// Consume the builder and return a [`NewDevice`].
    #[must_use]
    pub fn build(self) -> NewDevice {
        NewDevice {
            name: self.name,
            model: self.model,
            serial_number: self.serial_number,
            manufacturer: self.manufacturer,
            purchase_date: self.purchase_date,
            warranty_expiry: self.warranty_expiry,
            hospital_id: self.hospital_id,
        }
    }
}
