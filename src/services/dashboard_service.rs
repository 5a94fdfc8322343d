use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::DashboardPayload;
use crate::database::models::{DashboardRow, NewDashboard};
use crate::database::repository::{DashboardRepository, StoreError};
use crate::filter::DashboardFilter;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Item not found")]
    NotFound,

    #[error("Integrity error: duplicated datacube+shortName")]
    Conflict,

    #[error("Corrupted state. Get query returned > 1 result")]
    CorruptedState,

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => DashboardError::Conflict,
            StoreError::Database(e) => {
                error!("Dashboard storage error: {}", e);
                DashboardError::Database(e)
            }
        }
    }
}

/// CRUD over dashboards with the `(dataCube, shortName)` uniqueness rule.
///
/// Every public operation runs in its own transaction; mutations take the
/// write lock up front. An early return drops the transaction, which rolls it
/// back.
#[derive(Clone)]
pub struct DashboardService {
    repository: DashboardRepository,
}

impl DashboardService {
    pub fn new(repository: DashboardRepository) -> Self {
        Self { repository }
    }

    /// Records matching `filter`, in insertion order.
    ///
    /// The filter must already have been validated by the caller.
    pub async fn list(&self, filter: &DashboardFilter) -> Result<Vec<DashboardRow>, DashboardError> {
        let mut tx = self.repository.begin().await?;
        let rows = self.repository.select_any(&mut tx, filter).await?;
        tx.commit().await.map_err(StoreError::from)?;

        debug!(filtered = !filter.is_empty(), count = rows.len(), "Listed dashboards");
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<DashboardRow, DashboardError> {
        let mut tx = self.repository.begin().await?;
        let row = self.find_one(&mut tx, id).await?;
        tx.commit().await.map_err(StoreError::from)?;
        Ok(row)
    }

    pub async fn create(&self, payload: DashboardPayload) -> Result<DashboardRow, DashboardError> {
        if payload.id.is_some() {
            return Err(DashboardError::InvalidInput("'id' must NOT be set".to_string()));
        }
        let short_name = Self::require_short_name(payload.short_name)?;

        let dashboard = NewDashboard {
            data_cube: payload.data_cube,
            short_name,
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            hash: payload.hash,
            preset: payload.preset.unwrap_or(false),
        };

        let mut tx = self.repository.begin_write().await?;
        let created = match self.repository.insert(&mut tx, &dashboard).await {
            Ok(row) => row,
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(
                    data_cube = %dashboard.data_cube,
                    short_name = %dashboard.short_name,
                    "Rejected duplicate dashboard: {}", detail
                );
                return Err(DashboardError::Conflict);
            }
            Err(other) => return Err(other.into()),
        };
        tx.commit().await?;

        info!(id = created.id, "Created dashboard");
        Ok(created)
    }

    /// Full replace of an existing record; omitted optional fields reset to defaults
    pub async fn update(&self, payload: DashboardPayload) -> Result<DashboardRow, DashboardError> {
        let id = payload
            .id
            .ok_or_else(|| DashboardError::InvalidInput("'id' MUST be set".to_string()))?;
        let short_name = Self::require_short_name(payload.short_name)?;

        let dashboard = NewDashboard {
            data_cube: payload.data_cube,
            short_name,
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            hash: payload.hash,
            preset: payload.preset.unwrap_or(false),
        }
        .with_id(id);

        let mut tx = self.repository.begin_write().await?;
        self.find_one(&mut tx, id).await?;

        match self.repository.replace(&mut tx, &dashboard).await {
            Ok(_) => {}
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(id, "Rejected dashboard update: {}", detail);
                return Err(DashboardError::Conflict);
            }
            Err(other) => return Err(other.into()),
        }
        tx.commit().await?;

        info!(id, "Updated dashboard");
        Ok(dashboard)
    }

    /// Remove a record and hand back what was stored
    pub async fn delete(&self, id: i64) -> Result<DashboardRow, DashboardError> {
        let mut tx = self.repository.begin_write().await?;

        let existing = match self.find_one(&mut tx, id).await {
            Ok(row) => row,
            Err(DashboardError::CorruptedState) => return Err(DashboardError::CorruptedState),
            Err(DashboardError::Database(e)) => {
                warn!(id, "Lookup before delete failed, reporting not found: {}", e);
                return Err(DashboardError::NotFound);
            }
            Err(other) => return Err(other),
        };

        self.repository.delete_by_id(&mut tx, id).await?;
        tx.commit().await?;

        info!(id, "Deleted dashboard");
        Ok(existing)
    }

    async fn find_one(
        &self,
        conn: &mut sqlx::SqliteConnection,
        id: i64,
    ) -> Result<DashboardRow, DashboardError> {
        let rows = self.repository.select_by_id(conn, id).await?;
        single_row(rows)
    }

    fn require_short_name(short_name: Option<String>) -> Result<String, DashboardError> {
        match short_name {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(DashboardError::InvalidInput(
                "shortName not present or empty".to_string(),
            )),
        }
    }
}

/// Exactly one row, otherwise `NotFound` (none) or `CorruptedState` (several)
fn single_row<T>(mut rows: Vec<T>) -> Result<T, DashboardError> {
    match rows.len() {
        0 => Err(DashboardError::NotFound),
        1 => Ok(rows.remove(0)),
        n => {
            error!("Primary key lookup returned {} rows", n);
            Err(DashboardError::CorruptedState)
        }
    }
}
