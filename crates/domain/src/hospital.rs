//! Hospital: the site that owns registered devices.

use serde::{Deserialize, Serialize};

use crate::id::HospitalId;

/// A hospital. Immutable once registered; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub location: String,
    pub contact: String,
}

impl Hospital {
    #[must_use]
    pub fn new(
        id: HospitalId,
        name: impl Into<String>,
        location: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            contact: contact.into(),
        }
    }
}
