//! Clock port: logical time supplied by the host.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use medtrack_domain::time::{self, Timestamp};

/// Read-only source of the current ledger time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }
}

/// Host-driven ledger height. The host advances it between calls.
#[derive(Debug, Default)]
pub struct ManualClock {
    height: AtomicU64,
}

impl ManualClock {
    #[must_use]
    pub fn new(height: Timestamp) -> Self {
        Self {
            height: AtomicU64::new(height),
        }
    }

    pub fn set(&self, height: Timestamp) {
        self.height.store(height, Ordering::SeqCst);
    }

    /// Move the clock forward by `by` and return the new height.
    pub fn advance(&self, by: Timestamp) -> Timestamp {
        self.height.fetch_add(by, Ordering::SeqCst) + by
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.height.load(Ordering::SeqCst)
    }
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
