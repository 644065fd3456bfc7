//! Service history: the immutable record written when a service order
//! completes.

use serde::{Deserialize, Serialize};

use crate::error::InvalidStateError;
use crate::id::{DeviceId, ServiceId};
use crate::service_order::ServiceOrder;
use crate::time::Timestamp;

/// Completion record keyed by `(device_id, service_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHistoryEntry {
    pub device_id: DeviceId,
    pub service_id: ServiceId,
    /// Ledger clock at completion.
    pub completion_date: Timestamp,
    pub findings: String,
    pub parts_replaced: Vec<String>,
    pub next_service_date: Timestamp,
}

impl ServiceHistoryEntry {
    /// Error for a completion whose `(device_id, service_id)` entry is
    /// already recorded. Entries are written once and never replaced.
    #[must_use]
    pub fn already_recorded(device_id: DeviceId, service_id: ServiceId) -> InvalidStateError {
        InvalidStateError {
            entity: "ServiceHistory",
            id: format!("{device_id}/{service_id}"),
            expected: "absent".to_string(),
            actual: "recorded".to_string(),
        }
    }
}

/// Outcome reported by the technician when closing a service order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCompletion {
    pub findings: String,
    pub parts_replaced: Vec<String>,
    pub next_service_date: Timestamp,
}

impl ServiceCompletion {
    #[must_use]
    pub fn new(findings: impl Into<String>, next_service_date: Timestamp) -> Self {
        Self {
            findings: findings.into(),
            parts_replaced: Vec::new(),
            next_service_date,
        }
    }

    /// Append a replaced part; order is preserved.
    #[must_use]
    pub fn part(mut self, part: impl Into<String>) -> Self {
        self.parts_replaced.push(part.into());
        self
    }

    #[must_use]
    pub fn parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts_replaced.extend(parts.into_iter().map(Into::into));
        self
    }

    /// Build the history entry for `order`, stamped with `completed_at`.
    #[must_use]
    pub fn into_entry(self, order: &ServiceOrder, completed_at: Timestamp) -> ServiceHistoryEntry {
        ServiceHistoryEntry {
            device_id: order.device_id,
            service_id: order.id,
            completion_date: completed_at,
            findings: self.findings,
            parts_replaced: self.parts_replaced,
            next_service_date: self.next_service_date,
        }
    }
}
