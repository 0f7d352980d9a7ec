//! Persistence trait for plugin state records.

use async_trait::async_trait;

use crate::{
    Result,
    types::{NewPluginRecord, PluginRecord},
};

/// Persistence backend for plugin state.
///
/// A record's existence denotes "installed"; its `enabled` flag denotes
/// "active". `set_enabled` and `delete` are no-op successes when no record
/// exists — mutating a non-installed plugin is tolerated, not an error.
#[async_trait]
pub trait PluginStore: Send + Sync {
    /// Create or fully replace the record for `record.name`.
    async fn upsert(&self, record: &NewPluginRecord) -> Result<()>;

    async fn get(&self, name: &str) -> Result<Option<PluginRecord>>;

    async fn exists(&self, name: &str) -> Result<bool>;

    /// Whether the record exists and is enabled.
    async fn is_enabled(&self, name: &str) -> Result<bool>;

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<()>;

    async fn delete(&self, name: &str) -> Result<()>;

    async fn list(&self) -> Result<Vec<PluginRecord>>;

    async fn list_by_enabled(&self, enabled: bool) -> Result<Vec<PluginRecord>>;

    /// Replace the settings blob for `name`. No-op when the record is absent.
    async fn update_settings(&self, name: &str, settings: &serde_json::Value) -> Result<()>;

    /// Whether the backing storage is ready to answer queries.
    ///
    /// `false` during bootstrap-before-migration; callers fall back to the
    /// static config sources instead of failing.
    async fn is_available(&self) -> bool;
}

/// Current wall-clock time in milliseconds since the epoch.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
