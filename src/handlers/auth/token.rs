use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    response::Json,
    Form,
};

use crate::api::{TokenForm, TokenResponse};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /token - OAuth2 password grant; `username` carries the email
pub async fn token_post(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::bad_request(format!("Unsupported grant_type '{}'", grant_type)));
        }
    }
    let token = state.auth.authenticate(&form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(token)))
}
