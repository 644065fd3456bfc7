//! `SQLite` implementation of [`ServiceRepository`].
//!
//! Replaced parts are stored as a JSON array in a single `TEXT` column.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use medtrack_app::ports::ServiceRepository;
use medtrack_domain::error::LedgerError;
use medtrack_domain::id::{DeviceId, ServiceId, TechnicianId};
use medtrack_domain::service_history::ServiceHistoryEntry;
use medtrack_domain::service_order::{NewServiceOrder, ServiceOrder};
use medtrack_domain::status::ServiceStatus;

use crate::error::StorageError;
use crate::sql;

struct OrderRow(ServiceOrder);

impl<'r> FromRow<'r, SqliteRow> for OrderRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let device_id: i64 = row.try_get("device_id")?;
        let technician_id: i64 = row.try_get("technician_id")?;
        let scheduled_date: i64 = row.try_get("scheduled_date")?;
        let status: String = row.try_get("status")?;

        Ok(Self(ServiceOrder {
            id: ServiceId::new(sql::decode(id)?),
            device_id: DeviceId::new(sql::decode(device_id)?),
            technician_id: TechnicianId::new(sql::decode(technician_id)?),
            scheduled_date: sql::decode(scheduled_date)?,
            service_type: row.try_get("service_type")?,
            notes: row.try_get("notes")?,
            status: ServiceStatus::from(status),
        }))
    }
}

struct HistoryRow(ServiceHistoryEntry);

impl<'r> FromRow<'r, SqliteRow> for HistoryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let device_id: i64 = row.try_get("device_id")?;
        let service_id: i64 = row.try_get("service_id")?;
        let completion_date: i64 = row.try_get("completion_date")?;
        let next_service_date: i64 = row.try_get("next_service_date")?;
        let parts_json: String = row.try_get("parts_replaced")?;
        let parts_replaced: Vec<String> =
            serde_json::from_str(&parts_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ServiceHistoryEntry {
            device_id: DeviceId::new(sql::decode(device_id)?),
            service_id: ServiceId::new(sql::decode(service_id)?),
            completion_date: sql::decode(completion_date)?,
            findings: row.try_get("findings")?,
            parts_replaced,
            next_service_date: sql::decode(next_service_date)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO service_orders (device_id, technician_id, scheduled_date, service_type, notes, status)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM service_orders WHERE id = ?";
const UPDATE: &str = r"
    UPDATE service_orders
    SET device_id = ?, technician_id = ?, scheduled_date = ?, service_type = ?, notes = ?, status = ?
    WHERE id = ?
";
const COUNT: &str = "SELECT COUNT(*) FROM service_orders";

const INSERT_HISTORY: &str = r"
    INSERT INTO service_history
        (device_id, service_id, completion_date, findings, parts_replaced, next_service_date)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_HISTORY: &str =
    "SELECT * FROM service_history WHERE device_id = ? AND service_id = ?";
const SELECT_HISTORY_BY_DEVICE: &str =
    "SELECT * FROM service_history WHERE device_id = ? ORDER BY service_id";

/// `SQLite`-backed service order and history repository.
pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceRepository for SqliteServiceRepository {
    fn create(
        &self,
        order: NewServiceOrder,
    ) -> impl Future<Output = Result<ServiceOrder, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(sql::encode(order.device_id.get())?)
                .bind(sql::encode(order.technician_id.get())?)
                .bind(sql::encode(order.scheduled_date)?)
                .bind(&order.service_type)
                .bind(&order.notes)
                .bind(ServiceStatus::Scheduled.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = sql::decode(result.last_insert_rowid()).map_err(StorageError::from)?;
            Ok(order.into_order(ServiceId::new(id)))
        }
    }

    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<ServiceOrder>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<OrderRow> = sqlx::query_as(SELECT_BY_ID)
                .bind(sql::encode(id.get())?)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn update(
        &self,
        order: ServiceOrder,
    ) -> impl Future<Output = Result<ServiceOrder, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(sql::encode(order.device_id.get())?)
                .bind(sql::encode(order.technician_id.get())?)
                .bind(sql::encode(order.scheduled_date)?)
                .bind(&order.service_type)
                .bind(&order.notes)
                .bind(order.status.as_str())
                .bind(sql::encode(order.id.get())?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(order)
        }
    }

    fn record_completion(
        &self,
        order: ServiceOrder,
        entry: ServiceHistoryEntry,
    ) -> impl Future<Output = Result<ServiceHistoryEntry, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let parts_json = serde_json::to_string(&entry.parts_replaced).map_err(StorageError::from)?;

            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query("UPDATE service_orders SET status = ? WHERE id = ?")
                .bind(order.status.as_str())
                .bind(sql::encode(order.id.get())?)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            let inserted = sqlx::query(INSERT_HISTORY)
                .bind(sql::encode(entry.device_id.get())?)
                .bind(sql::encode(entry.service_id.get())?)
                .bind(sql::encode(entry.completion_date)?)
                .bind(&entry.findings)
                .bind(&parts_json)
                .bind(sql::encode(entry.next_service_date)?)
                .execute(&mut *tx)
                .await;

            match inserted {
                Ok(_) => {}
                Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                    return Err(
                        ServiceHistoryEntry::already_recorded(entry.device_id, entry.service_id)
                            .into(),
                    );
                }
                Err(err) => return Err(StorageError::from(err).into()),
            }

            tx.commit().await.map_err(StorageError::from)?;

            Ok(entry)
        }
    }

    fn get_history(
        &self,
        device_id: DeviceId,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Option<ServiceHistoryEntry>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<HistoryRow> = sqlx::query_as(SELECT_HISTORY)
                .bind(sql::encode(device_id.get())?)
                .bind(sql::encode(service_id.get())?)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn find_history_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<ServiceHistoryEntry>, LedgerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<HistoryRow> = sqlx::query_as(SELECT_HISTORY_BY_DEVICE)
                .bind(sql::encode(device_id.get())?)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
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
