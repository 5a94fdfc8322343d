use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /health - liveness plus a `SELECT 1` against the store
pub async fn health(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    DatabaseManager::health_check(&state.pool).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "database": "ok"
        })),
    ))
}
