//! Opening the ledger database.
//!
//! Every registry table lives in one `SQLite` file. Foreign keys are switched
//! on for each connection so a device, order or history row can never point
//! at a record that was not stored first.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Where the ledger database lives.
pub struct Config {
    /// `sqlx` connection URL, e.g. `sqlite:medtrack.db?mode=rwc`.
    pub database_url: String,
}

impl Config {
    /// A private database that disappears with its last connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_URL.to_string(),
        }
    }

    /// Open the database, creating the file on first use, and bring the
    /// registry schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the URL is malformed, the file cannot be
    /// opened, or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::open(&self.database_url).await
    }
}

/// An open ledger database with its schema applied.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Pool shared by the registry repositories.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
