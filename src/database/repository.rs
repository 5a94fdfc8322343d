use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;

use crate::database::models::{DashboardRow, NewDashboard};
use crate::database::transaction::WriteTransaction;
use crate::filter::DashboardFilter;

pub const DASHBOARDS_TABLE: &str = "turnilo_dashboards";

const DASHBOARD_COLUMNS: &str = "id, data_cube, short_name, name, description, hash, preset";

/// Failures at the storage boundary.
///
/// Unique-constraint violations are split out from every other database
/// error so callers can match on them instead of inspecting driver errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify an error raised by a write statement
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Access to the dashboards table.
///
/// Statements run on a caller-supplied connection so a service call can keep
/// several of them inside one transaction.
#[derive(Clone)]
pub struct DashboardRepository {
    table_name: &'static str,
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table_name: DASHBOARDS_TABLE,
            pool,
        }
    }

    /// Deferred transaction for read-only calls
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        Ok(self.pool.begin().await?)
    }

    /// Transaction holding the write lock from the start, for calls that write
    pub async fn begin_write(&self) -> Result<WriteTransaction, StoreError> {
        WriteTransaction::begin(&self.pool).await
    }

    /// Exact-match AND filter, ordered by id (insertion order)
    pub async fn select_any(
        &self,
        conn: &mut SqliteConnection,
        filter: &DashboardFilter,
    ) -> Result<Vec<DashboardRow>, StoreError> {
        let mut query = sqlx::QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM {}",
            DASHBOARD_COLUMNS, self.table_name
        ));

        let mut separator = " WHERE ";
        if let Some(short_name) = filter.short_name() {
            query
                .push(separator)
                .push("short_name = ")
                .push_bind(short_name.to_string());
            separator = " AND ";
        }
        if let Some(data_cube) = filter.data_cube() {
            query
                .push(separator)
                .push("data_cube = ")
                .push_bind(data_cube.to_string());
        }
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<DashboardRow>()
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    /// Every row carrying `id`; more than one means the table is corrupt
    pub async fn select_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Vec<DashboardRow>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            DASHBOARD_COLUMNS, self.table_name
        );
        let rows = sqlx::query_as::<_, DashboardRow>(&sql)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        dashboard: &NewDashboard,
    ) -> Result<DashboardRow, StoreError> {
        let sql = format!(
            "INSERT INTO {} (data_cube, short_name, name, description, hash, preset) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
            self.table_name, DASHBOARD_COLUMNS
        );
        sqlx::query_as::<_, DashboardRow>(&sql)
            .bind(&dashboard.data_cube)
            .bind(&dashboard.short_name)
            .bind(&dashboard.name)
            .bind(&dashboard.description)
            .bind(&dashboard.hash)
            .bind(dashboard.preset)
            .fetch_one(&mut *conn)
            .await
            .map_err(StoreError::from_write)
    }

    /// Overwrite every column of the row with `dashboard.id`
    pub async fn replace(
        &self,
        conn: &mut SqliteConnection,
        dashboard: &DashboardRow,
    ) -> Result<u64, StoreError> {
        let sql = format!(
            "UPDATE {} SET data_cube = ?, short_name = ?, name = ?, description = ?, hash = ?, preset = ? \
             WHERE id = ?",
            self.table_name
        );
        let result = sqlx::query(&sql)
            .bind(&dashboard.data_cube)
            .bind(&dashboard.short_name)
            .bind(&dashboard.name)
            .bind(&dashboard.description)
            .bind(&dashboard.hash)
            .bind(dashboard.preset)
            .bind(dashboard.id)
            .execute(&mut *conn)
            .await
            .map_err(StoreError::from_write)?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table_name);
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}
