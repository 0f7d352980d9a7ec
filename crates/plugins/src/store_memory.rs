//! In-memory store for testing and ephemeral setups.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    Result,
    store::{PluginStore, now_ms},
    types::{NewPluginRecord, PluginRecord},
};

/// In-memory store backed by `HashMap`. No persistence.
pub struct InMemoryStore {
    records: Mutex<HashMap<String, PluginRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginStore for InMemoryStore {
    async fn upsert(&self, record: &NewPluginRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let now = now_ms();
        let created_at_ms = records
            .get(&record.name)
            .map(|existing| existing.created_at_ms)
            .unwrap_or(now);
        records.insert(record.name.clone(), PluginRecord {
            name: record.name.clone(),
            display_name: record.display_name.clone(),
            description: record.description.clone(),
            version: record.version.clone(),
            author: record.author.clone(),
            url: record.url.clone(),
            enabled: record.enabled,
            settings: record.settings.clone(),
            metadata: record.metadata.clone(),
            created_at_ms,
            updated_at_ms: now,
        });
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<PluginRecord>> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(name).cloned())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.contains_key(name))
    }

    async fn is_enabled(&self, name: &str) -> Result<bool> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(name).map(|r| r.enabled).unwrap_or(false))
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(record) = records.get_mut(name) {
            record.enabled = enabled;
            record.updated_at_ms = now_ms();
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.remove(name);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PluginRecord>> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn list_by_enabled(&self, enabled: bool) -> Result<Vec<PluginRecord>> {
        let mut all = self.list().await?;
        all.retain(|r| r.enabled == enabled);
        Ok(all)
    }

    async fn update_settings(&self, name: &str, settings: &serde_json::Value) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(record) = records.get_mut(name) {
            record.settings = Some(settings.clone());
            record.updated_at_ms = now_ms();
        }
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}
