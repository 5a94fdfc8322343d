use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::api::{RegisterRequest, UserView};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /register - create a local user account.
///
/// Responds with the created user (`id`, `tenantId`, `email`, `isActive`,
/// `oauthProvider`) rather than a bare `{"message": ...}` confirmation.
/// Responds 409 when the email is already registered.
pub async fn register_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserView>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let user = state.auth.register(&request.email, &request.password).await?;
    Ok(Json(user.into()))
}
