use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub tenant_id: i64,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub oauth_provider: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub tenant_id: i64,
    pub email: String,
    pub hashed_password: String,
    pub oauth_provider: String,
}
