use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /protected - succeeds only behind a valid bearer token
pub async fn protected_get(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "message": "You are authenticated!",
        "user": user.email,
    }))
}
