//! Qualification: a technician's certification for one device type.

use serde::{Deserialize, Serialize};

use crate::id::TechnicianId;
use crate::technician::Technician;

/// Certification of a technician for a device type, keyed by
/// `(technician_id, device_type)`.
///
/// `verified` starts false and only ever moves to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub technician_id: TechnicianId,
    pub device_type: String,
    pub certification_level: String,
    pub verified: bool,
}

impl Qualification {
    /// A fresh, unverified qualification.
    #[must_use]
    pub fn new(
        technician_id: TechnicianId,
        device_type: impl Into<String>,
        certification_level: impl Into<String>,
    ) -> Self {
        Self {
            technician_id,
            device_type: device_type.into(),
            certification_level: certification_level.into(),
            verified: false,
        }
    }

    pub fn verify(&mut self) {
        self.verified = true;
    }

    /// Whether `technician` may service this device type: the qualification
    /// is verified, belongs to the technician, and the technician is active.
    #[must_use]
    pub fn qualifies(&self, technician: &Technician) -> bool {
        self.verified && self.technician_id == technician.id && technician.is_active()
    }
}
