use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{self, PasswordError, TokenIssuer};
use crate::config::SecurityConfig;
use crate::database::models::{NewUser, User};
use crate::database::repository::StoreError;
use crate::database::service::{find_user_by_email, insert_user};

const LOCAL_PROVIDER: &str = "local";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User already exists")]
    Conflict,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl AuthError {
    pub const BAD_CREDENTIALS: &'static str = "Incorrect email or password";
    pub const INVALID_TOKEN: &'static str = "Could not validate credentials";
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => AuthError::Conflict,
            StoreError::Database(e) => AuthError::Database(e),
        }
    }
}

/// Registration, login and bearer-token checks for users
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenIssuer,
    default_tenant_id: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, security: &SecurityConfig) -> Self {
        Self {
            pool,
            tokens: TokenIssuer::new(security),
            default_tenant_id: security.default_tenant_id,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        if find_user_by_email(&self.pool, email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let new_user = NewUser {
            tenant_id: self.default_tenant_id,
            email: email.to_string(),
            hashed_password: auth::hash_password(password)?,
            oauth_provider: LOCAL_PROVIDER.to_string(),
        };
        // The unique email constraint still guards against a concurrent registration
        let user = insert_user(&self.pool, &new_user).await?;

        info!(user_id = user.id, "Registered user");
        Ok(user)
    }

    /// Check credentials and issue a bearer token whose subject is the email
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = find_user_by_email(&self.pool, email)
            .await?
            .ok_or(AuthError::Unauthorized(AuthError::BAD_CREDENTIALS))?;

        if !user.is_active {
            warn!(user_id = user.id, "Login attempt for inactive user");
            return Err(AuthError::Unauthorized(AuthError::BAD_CREDENTIALS));
        }

        if !auth::verify_password(password, &user.hashed_password)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::Unauthorized(AuthError::BAD_CREDENTIALS));
        }

        Ok(self.tokens.issue(&user.email)?)
    }

    /// Resolve the user behind a bearer token
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| AuthError::Unauthorized(AuthError::INVALID_TOKEN))?;

        find_user_by_email(&self.pool, &claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized(AuthError::INVALID_TOKEN))
    }
}
