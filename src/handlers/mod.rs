// handlers/mod.rs - HTTP handlers grouped by resource
//
// Public (no auth): health, /register, /token, dashboard CRUD
// Bearer token required: /protected

pub mod auth;
pub mod dashboards;
pub mod health;

use crate::error::ApiError;

/// Parse a path segment as a record id
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request("Id is not an integer"))
}
