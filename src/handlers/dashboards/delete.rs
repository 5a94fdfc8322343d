use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::DashboardView;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::server::AppState;

/// DELETE /turnilo/dashboards/:id - responds with the removed record
pub async fn dashboard_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let id = parse_id(&id)?;
    let removed = state.dashboards.delete(id).await?;
    Ok(Json(removed.into()))
}
