//! Status vocabularies: open string domains with well-known values.
//!
//! Every status is persisted and compared as its string form. Known values
//! get a dedicated variant; anything else is kept verbatim in `Other`, so a
//! string always round-trips unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_status {
    (
        $(#[doc = $doc:expr])*
        $name:ident {
            $( $(#[doc = $vdoc:expr])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[doc = $vdoc])* $variant, )+
            /// Any value outside the well-known vocabulary.
            Other(String),
        }

        impl $name {
            /// The string form of this status.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $text, )+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $text => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status!(
    /// Operational status of a [`Device`](crate::device::Device).
    DeviceStatus {
        /// In service. Every device starts here.
        Active => "active",
        Maintenance => "maintenance",
        Retired => "retired",
    }
);

define_status!(
    /// Employment status of a [`Technician`](crate::technician::Technician).
    TechnicianStatus {
        /// Allowed to service devices. Every technician starts here.
        Active => "active",
        Inactive => "inactive",
    }
);

define_status!(
    /// Lifecycle status of a [`ServiceOrder`](crate::service_order::ServiceOrder).
    ///
    /// `scheduled → in-progress → completed` is the expected path, but the
    /// generic status setter accepts any value.
    ServiceStatus {
        Scheduled => "scheduled",
        InProgress => "in-progress",
        /// Terminal; reached through completion, which records history.
        Completed => "completed",
    }
);
