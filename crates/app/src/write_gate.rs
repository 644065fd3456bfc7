//! Write gate: serializes every mutating registry call.
//!
//! All registries of one ledger share a single gate. A mutation holds it
//! across its whole read-validate-write sequence (including cross-registry
//! lookups and id assignment), so concurrent callers observe each call as
//! one atomic step. Reads never take it.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Shared mutual-exclusion section for ledger mutations.
#[derive(Debug, Clone, Default)]
pub struct WriteGate {
    lock: Arc<Mutex<()>>,
}

impl WriteGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access. The section ends when the guard drops.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
