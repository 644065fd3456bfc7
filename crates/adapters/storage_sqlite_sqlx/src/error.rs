//! Storage-specific error type wrapping sqlx errors.

use medtrack_domain::error::LedgerError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to encode or decode a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An integer does not fit the signed 64-bit column type.
    #[error("value {0} exceeds the storable integer range")]
    OutOfRange(u64),
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
