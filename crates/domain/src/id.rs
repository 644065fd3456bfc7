//! Typed identifier newtypes backed by positive integers.
//!
//! Device, technician and service ids are assigned by their registry from a
//! monotonic counter starting at 1. Hospital ids are chosen by the caller.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// First identifier handed out by an auto-assigning registry.
            pub const FIRST: Self = Self(1);

            /// Wrap a raw integer.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Access the inner integer.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Caller-chosen identifier for a [`Hospital`](crate::hospital::Hospital).
    HospitalId
);

define_id!(
    /// Registry-assigned identifier for a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Registry-assigned identifier for a [`Technician`](crate::technician::Technician).
    TechnicianId
);

define_id!(
    /// Registry-assigned identifier for a [`ServiceOrder`](crate::service_order::ServiceOrder).
    ServiceId
);
