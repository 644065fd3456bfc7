//! Conversions between domain integers and `SQLite` `INTEGER` columns.

use crate::error::StorageError;

/// Convert an unsigned domain value for binding.
pub(crate) fn encode(value: u64) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(|_| StorageError::OutOfRange(value))
}

/// Convert a stored column value back to the unsigned domain value.
pub(crate) fn decode(value: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
