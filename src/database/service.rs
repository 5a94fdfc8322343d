use sqlx::SqlitePool;

use crate::database::models::{NewUser, User};
use crate::database::repository::StoreError;

const USER_COLUMNS: &str = "id, tenant_id, email, hashed_password, is_active, oauth_provider";

/// Look up a user by login email
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, StoreError> {
    let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Insert a user; a duplicate email surfaces as [`StoreError::UniqueViolation`]
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<User, StoreError> {
    let sql = format!(
        "INSERT INTO users (tenant_id, email, hashed_password, is_active, oauth_provider) \
         VALUES (?, ?, ?, 1, ?) RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(user.tenant_id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.oauth_provider)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_write)
}
