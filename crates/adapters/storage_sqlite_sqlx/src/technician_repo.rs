//! `SQLite` implementation of [`TechnicianRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use medtrack_app::ports::TechnicianRepository;
use medtrack_domain::error::LedgerError;
use medtrack_domain::id::TechnicianId;
use medtrack_domain::qualification::Qualification;
use medtrack_domain::status::TechnicianStatus;
use medtrack_domain::technician::{NewTechnician, Technician};

use crate::error::StorageError;
use crate::sql;

struct TechnicianRow(Technician);

impl<'r> FromRow<'r, SqliteRow> for TechnicianRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let certification_date: i64 = row.try_get("certification_date")?;
        let certification_expiry: i64 = row.try_get("certification_expiry")?;
        let status: String = row.try_get("status")?;

        Ok(Self(Technician {
            id: TechnicianId::new(sql::decode(id)?),
            name: row.try_get("name")?,
            contact: row.try_get("contact")?,
            certification_date: sql::decode(certification_date)?,
            certification_expiry: sql::decode(certification_expiry)?,
            status: TechnicianStatus::from(status),
        }))
    }
}

struct QualificationRow(Qualification);

impl<'r> FromRow<'r, SqliteRow> for QualificationRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let technician_id: i64 = row.try_get("technician_id")?;

        Ok(Self(Qualification {
            technician_id: TechnicianId::new(sql::decode(technician_id)?),
            device_type: row.try_get("device_type")?,
            certification_level: row.try_get("certification_level")?,
            verified: row.try_get("verified")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO technicians (name, contact, certification_date, certification_expiry, status)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM technicians WHERE id = ?";
const UPDATE: &str = r"
    UPDATE technicians
    SET name = ?, contact = ?, certification_date = ?, certification_expiry = ?, status = ?
    WHERE id = ?
";
const COUNT: &str = "SELECT COUNT(*) FROM technicians";

const UPSERT_QUALIFICATION: &str = r"
    INSERT INTO qualifications (technician_id, device_type, certification_level, verified)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (technician_id, device_type) DO UPDATE SET
        certification_level = excluded.certification_level,
        verified = excluded.verified
";
const SELECT_QUALIFICATION: &str =
    "SELECT * FROM qualifications WHERE technician_id = ? AND device_type = ?";
const SELECT_QUALIFICATIONS_BY_TECHNICIAN: &str =
    "SELECT * FROM qualifications WHERE technician_id = ? ORDER BY device_type";

/// `SQLite`-backed technician and qualification repository.
pub struct SqliteTechnicianRepository {
    pool: SqlitePool,
}

impl SqliteTechnicianRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TechnicianRepository for SqliteTechnicianRepository {
    fn create(
        &self,
        technician: NewTechnician,
    ) -> impl Future<Output = Result<Technician, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&technician.name)
                .bind(&technician.contact)
                .bind(sql::encode(technician.certification_date)?)
                .bind(sql::encode(technician.certification_expiry)?)
                .bind(TechnicianStatus::Active.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = sql::decode(result.last_insert_rowid()).map_err(StorageError::from)?;
            Ok(technician.into_technician(TechnicianId::new(id)))
        }
    }

    fn get_by_id(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<TechnicianRow> = sqlx::query_as(SELECT_BY_ID)
                .bind(sql::encode(id.get())?)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn update(
        &self,
        technician: Technician,
    ) -> impl Future<Output = Result<Technician, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&technician.name)
                .bind(&technician.contact)
                .bind(sql::encode(technician.certification_date)?)
                .bind(sql::encode(technician.certification_expiry)?)
                .bind(technician.status.as_str())
                .bind(sql::encode(technician.id.get())?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(technician)
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

    fn save_qualification(
        &self,
        qualification: Qualification,
    ) -> impl Future<Output = Result<Qualification, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPSERT_QUALIFICATION)
                .bind(sql::encode(qualification.technician_id.get())?)
                .bind(&qualification.device_type)
                .bind(&qualification.certification_level)
                .bind(qualification.verified)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(qualification)
        }
    }

    fn get_qualification(
        &self,
        technician_id: TechnicianId,
        device_type: &str,
    ) -> impl Future<Output = Result<Option<Qualification>, LedgerError>> + Send {
        let pool = self.pool.clone();
        let device_type = device_type.to_owned();
        async move {
            let row: Option<QualificationRow> = sqlx::query_as(SELECT_QUALIFICATION)
                .bind(sql::encode(technician_id.get())?)
                .bind(&device_type)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn find_qualifications(
        &self,
        technician_id: TechnicianId,
    ) -> impl Future<Output = Result<Vec<Qualification>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<QualificationRow> = sqlx::query_as(SELECT_QUALIFICATIONS_BY_TECHNICIAN)
                .bind(sql::encode(technician_id.get())?)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}
