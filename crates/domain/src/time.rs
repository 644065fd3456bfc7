//! Time and timestamp helpers.

use chrono::Utc;

/// Point in time as supplied by the host: unix seconds for calendar dates,
/// or the ledger height for completion records.
pub type Timestamp = u64;

/// Return the current wall-clock time as unix seconds.
#[must_use]
pub fn now() -> Timestamp {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}
