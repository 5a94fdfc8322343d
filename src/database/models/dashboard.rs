use sqlx::FromRow;

/// Stored dashboard row in `turnilo_dashboards`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DashboardRow {
    pub id: i64,
    pub data_cube: String,
    pub short_name: String,
    pub name: String,
    pub description: String,
    pub hash: String,
    pub preset: bool,
}

/// Dashboard about to be inserted; the store assigns `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDashboard {
    pub data_cube: String,
    pub short_name: String,
    pub name: String,
    pub description: String,
    pub hash: String,
    pub preset: bool,
}

impl NewDashboard {
    pub fn with_id(self, id: i64) -> DashboardRow {
        DashboardRow {
            id,
            data_cube: self.data_cube,
            short_name: self.short_name,
            name: self.name,
            description: self.description,
            hash: self.hash,
            preset: self.preset,
        }
    }
}
