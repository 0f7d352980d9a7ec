//! Plugin discovery and lifecycle management.
//!
//! Plugins are self-describing directories (a `plugin.json` with a
//! `filaman-plugin` type marker) under a plugins root. The registry merges
//! what is on disk with the persisted state table and exposes idempotent
//! install/uninstall/enable/disable operations over the merged view.

pub mod error;
pub mod hooks;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod scan;
pub mod settings;
pub mod sources;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;
pub mod types;

pub use error::{Error, Result};

/// Run database migrations for the plugins crate.
///
/// Creates the `plugins` table. Call at application startup when using
/// [`store_sqlite::SqliteStore`] with a shared pool.
pub async fn run_migrations(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .set_ignore_missing(true)
        .run(pool)
        .await?;
    Ok(())
}
