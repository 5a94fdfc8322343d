use serde::{Deserialize, Serialize};

use crate::database::models::DashboardRow;

/// Dashboard as received in request bodies.
///
/// `id` and `shortName` are optional at the wire level so the service can
/// reject them with a domain error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub data_cube: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<bool>,
}

/// Dashboard as returned in responses, every field present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub id: i64,
    pub data_cube: String,
    pub short_name: String,
    pub name: String,
    pub description: String,
    pub hash: String,
    pub preset: bool,
}

impl From<DashboardRow> for DashboardView {
    fn from(row: DashboardRow) -> Self {
        Self {
            id: row.id,
            data_cube: row.data_cube,
            short_name: row.short_name,
            name: row.name,
            description: row.description,
            hash: row.hash,
            preset: row.preset,
        }
    }
}
