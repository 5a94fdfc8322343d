use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use crate::api::{DashboardPayload, DashboardView};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::server::AppState;

/// PUT /turnilo/dashboards/:id - full replace.
///
/// The id in the path wins over any id present in the body.
pub async fn dashboard_put(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<DashboardPayload>, JsonRejection>,
) -> Result<Json<DashboardView>, ApiError> {
    let id = parse_id(&id)?;
    let Json(mut payload) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    payload.id = Some(id);

    let row = state.dashboards.update(payload).await?;
    Ok(Json(row.into()))
}
