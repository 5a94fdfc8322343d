use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::api::{DashboardPayload, DashboardView};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /turnilo/dashboards - create a dashboard; the body must not carry an id
pub async fn dashboard_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DashboardPayload>, JsonRejection>,
) -> Result<Json<DashboardView>, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let row = state.dashboards.create(payload).await?;
    Ok(Json(row.into()))
}
