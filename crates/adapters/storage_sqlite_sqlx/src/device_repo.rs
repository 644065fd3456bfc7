//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use medtrack_app::ports::DeviceRepository;
use medtrack_domain::device::{Device, NewDevice};
use medtrack_domain::error::LedgerError;
use medtrack_domain::id::{DeviceId, HospitalId};
use medtrack_domain::status::DeviceStatus;

use crate::error::StorageError;
use crate::sql;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let purchase_date: i64 = row.try_get("purchase_date")?;
        let warranty_expiry: i64 = row.try_get("warranty_expiry")?;
        let hospital_id: i64 = row.try_get("hospital_id")?;
        let status: String = row.try_get("status")?;

        Ok(Self(Device {
            id: DeviceId::new(sql::decode(id)?),
            name: row.try_get("name")?,
            model: row.try_get("model")?,
            serial_number: row.try_get("serial_number")?,
            manufacturer: row.try_get("manufacturer")?,
            purchase_date: sql::decode(purchase_date)?,
            warranty_expiry: sql::decode(warranty_expiry)?,
            hospital_id: HospitalId::new(sql::decode(hospital_id)?),
            status: DeviceStatus::from(status),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO devices
        (name, model, serial_number, manufacturer, purchase_date, warranty_expiry, hospital_id, status)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_BY_HOSPITAL: &str = "SELECT * FROM devices WHERE hospital_id = ? ORDER BY id";
const UPDATE: &str = r"
    UPDATE devices
    SET name = ?, model = ?, serial_number = ?, manufacturer = ?,
        purchase_date = ?, warranty_expiry = ?, hospital_id = ?, status = ?
    WHERE id = ?
";
const COUNT: &str = "SELECT COUNT(*) FROM devices";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(
        &self,
        device: NewDevice,
    ) -> impl Future<Output = Result<Device, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&device.name)
                .bind(&device.model)
                .bind(&device.serial_number)
                .bind(&device.manufacturer)
                .bind(sql::encode(device.purchase_date)?)
                .bind(sql::encode(device.warranty_expiry)?)
                .bind(sql::encode(device.hospital_id.get())?)
                .bind(DeviceStatus::Active.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = sql::decode(result.last_insert_rowid()).map_err(StorageError::from)?;
            Ok(device.into_device(DeviceId::new(id)))
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(sql::encode(id.get())?)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(&device.model)
                .bind(&device.serial_number)
                .bind(&device.manufacturer)
                .bind(sql::encode(device.purchase_date)?)
                .bind(sql::encode(device.warranty_expiry)?)
                .bind(sql::encode(device.hospital_id.get())?)
                .bind(device.status.as_str())
                .bind(sql::encode(device.id.get())?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn find_by_hospital(
        &self,
        hospital_id: HospitalId,
    ) -> impl Future<Output = Result<Vec<Device>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_HOSPITAL)
                .bind(sql::encode(hospital_id.get())?)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
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
