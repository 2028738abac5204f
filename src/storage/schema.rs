use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use super::types::StoreError;

// ============================================================================
// Database
// ============================================================================

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Open a database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceLocked` if another instance of vidgrid
    /// has the database locked (SQLITE_BUSY, SQLITE_LOCKED, SQLITE_CANTOPEN).
    /// Returns `StoreError::Other` for other database errors.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let url = format!("sqlite:{}?mode=rwc", path);

        // busy_timeout=5000: SQLite waits up to 5 seconds for locks to release
        // before returning SQLITE_BUSY. Using pragma() ensures all connections
        // in the pool inherit this setting.
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(StoreError::from_sqlx)?
            .pragma("busy_timeout", "5000");
        // SQLite is single-writer; the feed endpoint is read-only after seeding,
        // so a small pool covers concurrent page requests comfortably.
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(StoreError::from_sqlx)?;
        let db = Self { pool };
        db.migrate().await.map_err(|e| {
            let error_string = e.to_string().to_lowercase();
            if error_string.contains("database is locked")
                || error_string.contains("database table is locked")
                || error_string.contains("sqlite_busy")
                || error_string.contains("sqlite_locked")
            {
                StoreError::InstanceLocked
            } else {
                StoreError::Migration(e.to_string())
            }
        })?;
        Ok(db)
    }

    /// Close the connection pool. Queries issued afterwards fail, which is
    /// how tests exercise the API's store-fault path.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations atomically within a transaction.
    ///
    /// All schema changes are wrapped in a single transaction so a failed
    /// migration step leaves the database in its previous consistent state.
    /// Everything uses `IF NOT EXISTS` for idempotency, so re-running on an
    /// existing database is a no-op.
    async fn migrate(&self) -> Result<()> {
        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&self.pool)
            .await?;

        let mut tx = self.pool.begin().await?;

        // The videos table. `id` is textual and unique: the feed endpoint
        // orders by it so successive pages neither overlap nor skip rows.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                category TEXT,
                image_url TEXT,
                channel_name TEXT,
                channel_image_url TEXT,
                view_count INTEGER DEFAULT 0
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        // Category is scanned by the seeding summary and nothing else hot,
        // but the index keeps ad-hoc inspection queries cheap.
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_videos_category ON videos(category)")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
