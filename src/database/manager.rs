use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS turnilo_dashboards (
        id INTEGER PRIMARY KEY,
        data_cube TEXT NOT NULL,
        short_name TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        hash TEXT NOT NULL,
        preset INTEGER NOT NULL DEFAULT 0,
        CONSTRAINT uq_dashboard_data_cube_short_name UNIQUE (data_cube, short_name)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_turnilo_dashboards_short_name ON turnilo_dashboards (short_name)",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        tenant_id INTEGER NOT NULL,
        email TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        oauth_provider TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_users_tenant_id ON users (tenant_id)",
];

/// Builds the explicitly owned connection pool handed to the services
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the pool described by `config` and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true)
            .foreign_keys(true)
            // Writers queue on the write lock for up to this long
            .busy_timeout(Duration::from_secs(config.acquire_timeout_secs));

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        if Self::is_in_memory(&config.url) {
            // Every in-memory connection is a separate database, so keep exactly one alive.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            if let Some(dir) = Self::database_dir(&config.url) {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    info!("Creating database directory {}", dir.display());
                    std::fs::create_dir_all(dir)?;
                }
            }
            options = options.journal_mode(SqliteJournalMode::Wal);
            pool_options = pool_options.max_connections(config.max_connections);
        }

        let pool = pool_options.connect_with(options).await?;
        Self::migrate(&pool).await?;

        info!("Database ready: {}", Self::redacted(&config.url));
        Ok(pool)
    }

    /// Create tables and indexes when missing
    pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        }
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// Directory holding the database file for `sqlite://path/to/file.db` URLs
    fn database_dir(url: &str) -> Option<&Path> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);
        Path::new(path).parent()
    }

    // Query strings may carry credentials for other drivers; never log them.
    fn redacted(url: &str) -> &str {
        url.split('?').next().unwrap_or(url)
    }
}
