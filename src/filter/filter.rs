use serde::Deserialize;

use super::error::FilterError;
use super::validate::validate;

/// Raw query parameters accepted by the dashboard listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(rename = "dataCube")]
    pub data_cube: Option<String>,
}

/// Validated exact-match filter over the dashboard natural key.
///
/// Fields only ever hold values that passed [`validate`]; the dashboard
/// service relies on that and does not check them again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    short_name: Option<String>,
    data_cube: Option<String>,
}

impl DashboardFilter {
    /// No filtering: every record matches
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_query(query: FilterQuery) -> Result<Self, FilterError> {
        let short_name = Self::checked(query.short_name, FilterError::InvalidShortName)?;
        let data_cube = Self::checked(query.data_cube, FilterError::InvalidDataCube)?;
        Ok(Self { short_name, data_cube })
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn data_cube(&self) -> Option<&str> {
        self.data_cube.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.short_name.is_none() && self.data_cube.is_none()
    }

    // An empty parameter (`?shortName=`) counts as absent.
    fn checked(
        value: Option<String>,
        invalid: fn(String) -> FilterError,
    ) -> Result<Option<String>, FilterError> {
        match value {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(None),
            Some(v) if validate(&v) => Ok(Some(v)),
            Some(v) => Err(invalid(v)),
        }
    }
}
