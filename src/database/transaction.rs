use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::warn;

use crate::database::repository::StoreError;

/// Transaction opened with `BEGIN IMMEDIATE`.
///
/// The write lock is taken before the first statement, so a read-then-write
/// sequence never has to upgrade a shared lock and concurrent writers queue on
/// the busy timeout instead of failing with `SQLITE_BUSY`. Dropping it without
/// `commit` rolls back, like `sqlx::Transaction`.
pub struct WriteTransaction {
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTransaction {
    pub async fn begin(pool: &SqlitePool) -> Result<Self, StoreError> {
        let mut conn = pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        Ok(Self { conn: Some(conn) })
    }

    pub async fn commit(mut self) -> Result<(), StoreError> {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = sqlx::query("COMMIT").execute(&mut *conn).await {
                // A failed COMMIT leaves the transaction open
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    warn!("Rollback after failed commit failed: {}", rollback);
                    drop(conn.detach());
                }
                return Err(e.into());
            }
        }
        Ok(())
    }
}

impl Deref for WriteTransaction {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        self.conn.as_deref().expect("write transaction already finished")
    }
}

impl DerefMut for WriteTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn.as_deref_mut().expect("write transaction already finished")
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                        warn!("Rollback of abandoned write transaction failed: {}", e);
                        drop(conn.detach());
                    }
                });
            }
            // No runtime to roll back on: closing the connection discards the transaction
            Err(_) => drop(conn.detach()),
        }
    }
}
