//! Technician: a person certified to service devices.

use serde::{Deserialize, Serialize};

use crate::id::TechnicianId;
use crate::status::TechnicianStatus;
use crate::time::Timestamp;

/// A registered technician. Only `status` changes after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub contact: String,
    pub certification_date: Timestamp,
    pub certification_expiry: Timestamp,
    pub status: TechnicianStatus,
}

impl Technician {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TechnicianStatus::Active
    }
}

/// Registration request for a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTechnician {
    pub name: String,
    pub contact: String,
    pub certification_date: Timestamp,
    pub certification_expiry: Timestamp,
}

impl NewTechnician {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        certification_date: Timestamp,
        certification_expiry: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            certification_date,
            certification_expiry,
        }
    }

    /// Turn the request into a stored record: assigned `id`, status `active`.
    #[must_use]
    pub fn into_technician(self, id: TechnicianId) -> Technician {
        Technician {
            id,
            name: self.name,
            contact: self.contact,
            certification_date: self.certification_date,
            certification_expiry: self.certification_expiry,
            status: TechnicianStatus::Active,
        }
    }
}
