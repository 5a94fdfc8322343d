use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::DashboardView;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::server::AppState;

/// GET /turnilo/dashboards/:id
pub async fn dashboard_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let id = parse_id(&id)?;
    let row = state.dashboards.get_by_id(id).await?;
    Ok(Json(row.into()))
}
