//! SQLite-backed plugin store using sqlx.

use {
    async_trait::async_trait,
    sqlx::{
        Row, SqlitePool,
        sqlite::{SqlitePoolOptions, SqliteRow},
    },
};

use crate::{
    Result,
    error::Error,
    store::{PluginStore, now_ms},
    types::{NewPluginRecord, PluginRecord},
};

/// SQLite-backed persistence for plugin records.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with its own connection pool and run migrations.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        crate::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store using an existing pool.
    ///
    /// Migrations are deliberately not run here: [`SqliteStore::is_available`]
    /// reports `false` until the `plugins` table exists, which lets the
    /// registry operate on config fallbacks before migrations have run.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &SqliteRow) -> Result<PluginRecord> {
    let settings: Option<String> = row.get("settings");
    let metadata: Option<String> = row.get("metadata");
    Ok(PluginRecord {
        name: row.get("name"),
        display_name: row.get("display_name"),
        description: row.get("description"),
        version: row.get("version"),
        author: row.get("author"),
        url: row.get("url"),
        enabled: row.get::<i64, _>("enabled") != 0,
        settings: settings.as_deref().map(serde_json::from_str).transpose()?,
        metadata: metadata.as_deref().map(serde_json::from_str).transpose()?,
        created_at_ms: row.get::<i64, _>("created_at") as u64,
        updated_at_ms: row.get::<i64, _>("updated_at") as u64,
    })
}

fn json_opt(value: &Option<serde_json::Value>) -> Result<Option<String>> {
    value
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(Error::from)
}

#[async_trait]
impl PluginStore for SqliteStore {
    async fn upsert(&self, record: &NewPluginRecord) -> Result<()> {
        let now = now_ms() as i64;
        sqlx::query(
            "INSERT INTO plugins
             (name, display_name, description, version, author, url, enabled, settings, metadata, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                display_name = excluded.display_name,
                description  = excluded.description,
                version      = excluded.version,
                author       = excluded.author,
                url          = excluded.url,
                enabled      = excluded.enabled,
                settings     = excluded.settings,
                metadata     = excluded.metadata,
                updated_at   = excluded.updated_at",
        )
        .bind(&record.name)
        .bind(&record.display_name)
        .bind(&record.description)
        .bind(&record.version)
        .bind(&record.author)
        .bind(&record.url)
        .bind(record.enabled as i64)
        .bind(json_opt(&record.settings)?)
        .bind(json_opt(&record.metadata)?)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<PluginRecord>> {
        let row = sqlx::query("SELECT * FROM plugins WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM plugins WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn is_enabled(&self, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT enabled FROM plugins WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<i64, _>("enabled") != 0).unwrap_or(false))
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        // Zero rows affected is fine: flipping a non-installed plugin is a no-op.
        sqlx::query("UPDATE plugins SET enabled = ?, updated_at = ? WHERE name = ?")
            .bind(enabled as i64)
            .bind(now_ms() as i64)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        sqlx::query("DELETE FROM plugins WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PluginRecord>> {
        let rows = sqlx::query("SELECT * FROM plugins ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn list_by_enabled(&self, enabled: bool) -> Result<Vec<PluginRecord>> {
        let rows = sqlx::query("SELECT * FROM plugins WHERE enabled = ? ORDER BY name")
            .bind(enabled as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn update_settings(&self, name: &str, settings: &serde_json::Value) -> Result<()> {
        sqlx::query("UPDATE plugins SET settings = ?, updated_at = ? WHERE name = ?")
            .bind(serde_json::to_string(settings)?)
            .bind(now_ms() as i64)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn is_available(&self) -> bool {
        sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'plugins'")
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.is_some())
            .unwrap_or(false)
    }
}
