//! `SQLite` implementation of [`HospitalRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use medtrack_app::ports::HospitalRepository;
use medtrack_domain::error::{ConflictError, LedgerError};
use medtrack_domain::hospital::Hospital;
use medtrack_domain::id::HospitalId;

use crate::error::StorageError;
use crate::sql;

/// Wrapper for converting database rows into domain [`Hospital`].
struct Wrapper(Hospital);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;

        Ok(Self(Hospital {
            id: HospitalId::new(sql::decode(id)?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            contact: row.try_get("contact")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO hospitals (id, name, location, contact) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM hospitals WHERE id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM hospitals";

/// `SQLite`-backed hospital repository.
pub struct SqliteHospitalRepository {
    pool: SqlitePool,
}

impl SqliteHospitalRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HospitalRepository for SqliteHospitalRepository {
    fn insert(
        &self,
        hospital: Hospital,
    ) -> impl Future<Output = Result<Hospital, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(sql::encode(hospital.id.get())?)
                .bind(&hospital.name)
                .bind(&hospital.location)
                .bind(&hospital.contact)
                .execute(&pool)
                .await;

            match result {
                Ok(_) => Ok(hospital),
                Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                    Err(ConflictError {
                        entity: "Hospital",
                        id: hospital.id.to_string(),
                    }
                    .into())
                }
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }

    fn get_by_id(
        &self,
        id: HospitalId,
    ) -> impl Future<Output = Result<Option<Hospital>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(sql::encode(id.get())?)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn count(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(sql::decode(count).map_err(StorageError::from)?)
        }
    }
}
