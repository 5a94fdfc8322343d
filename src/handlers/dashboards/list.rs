use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::api::DashboardView;
use crate::error::ApiError;
use crate::filter::{DashboardFilter, FilterQuery};
use crate::server::AppState;

/// GET /turnilo/dashboards - list dashboards, optionally filtered by
/// `shortName` and/or `dataCube` (exact match, AND-ed)
pub async fn dashboards_get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<DashboardView>>, ApiError> {
    let filter = DashboardFilter::from_query(query)?;
    let rows = state.dashboards.list(&filter).await?;

    Ok(Json(rows.into_iter().map(DashboardView::from).collect()))
}
