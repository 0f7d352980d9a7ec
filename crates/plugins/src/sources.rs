//! Ordered state sources for installed/enabled lookups.
//!
//! The fallback policy from the persisted store down to static config is
//! modeled as an explicit chain of sources queried in turn, so the policy
//! itself can be tested in isolation. A source answers `Some` when it is
//! authoritative for the question and `None` to defer to the next one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{paths::PathRegistry, store::PluginStore};

/// One source of installed/enabled truth.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// `None` when this source cannot answer for the unit.
    async fn enabled(&self, name: &str) -> Option<bool>;

    /// `None` when this source cannot answer for the unit.
    async fn installed(&self, name: &str) -> Option<bool>;
}

/// Queries sources in order; the first `Some` answer wins. Defaults to
/// `false` when no source answers.
pub struct SourceChain {
    sources: Vec<Box<dyn StateSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn StateSource>>) -> Self {
        Self { sources }
    }

    pub async fn is_enabled(&self, name: &str) -> bool {
        for source in &self.sources {
            if let Some(answer) = source.enabled(name).await {
                return answer;
            }
        }
        false
    }

    pub async fn is_installed(&self, name: &str) -> bool {
        for source in &self.sources {
            if let Some(answer) = source.installed(name).await {
                return answer;
            }
        }
        false
    }
}

// ── Store-backed source ──────────────────────────────────────────────────────

/// Authoritative source backed by the plugin store. Defers when the store's
/// backing table is not ready yet.
pub struct StoreSource {
    store: Arc<dyn PluginStore>,
}

impl StoreSource {
    pub fn new(store: Arc<dyn PluginStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StateSource for StoreSource {
    async fn enabled(&self, name: &str) -> Option<bool> {
        if !self.store.is_available().await {
            return None;
        }
        match self.store.is_enabled(name).await {
            Ok(enabled) => Some(enabled),
            Err(e) => {
                tracing::warn!(plugin = name, %e, "store enabled lookup failed, deferring");
                None
            },
        }
    }

    async fn installed(&self, name: &str) -> Option<bool> {
        if !self.store.is_available().await {
            return None;
        }
        match self.store.exists(name).await {
            Ok(exists) => Some(exists),
            Err(e) => {
                tracing::warn!(plugin = name, %e, "store installed lookup failed, deferring");
                None
            },
        }
    }
}

// ── Path-registration source ─────────────────────────────────────────────────

/// Installed fallback: a plugin with a registered path entry counts as
/// installed. Never answers enabled questions.
pub struct PathsFileSource {
    paths: Arc<PathRegistry>,
}

impl PathsFileSource {
    pub fn new(paths: Arc<PathRegistry>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl StateSource for PathsFileSource {
    async fn enabled(&self, _name: &str) -> Option<bool> {
        None
    }

    async fn installed(&self, name: &str) -> Option<bool> {
        Some(self.paths.contains(name))
    }
}

// ── Static config source ─────────────────────────────────────────────────────

/// Enabled fallback: a configured list of short plugin names (with any
/// `-plugin` suffix stripped) considered enabled before the store is ready.
pub struct ConfigListSource {
    enabled: Vec<String>,
}

impl ConfigListSource {
    pub fn new(enabled: Vec<String>) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl StateSource for ConfigListSource {
    async fn enabled(&self, name: &str) -> Option<bool> {
        let short = name.strip_suffix("-plugin").unwrap_or(name);
        Some(self.enabled.iter().any(|n| n == short))
    }

    async fn installed(&self, _name: &str) -> Option<bool> {
        None
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{store_memory::InMemoryStore, types::NewPluginRecord},
    };

    #[tokio::test]
    async fn test_store_source_answers_when_available() {
        let store = Arc::new(InMemoryStore::new());
        store
            .upsert(&NewPluginRecord {
                name: "pages".into(),
                enabled: true,
                ..Default::default()
            })
            .await
            .unwrap();

        let chain = SourceChain::new(vec![
            Box::new(StoreSource::new(store)),
            Box::new(ConfigListSource::new(vec!["other".into()])),
        ]);

        assert!(chain.is_enabled("pages").await);
        assert!(chain.is_installed("pages").await);
        // Store is authoritative: the config list never gets consulted.
        assert!(!chain.is_enabled("other").await);
    }

    #[tokio::test]
    async fn test_config_fallback_strips_plugin_suffix() {
        let chain = SourceChain::new(vec![Box::new(ConfigListSource::new(vec!["pages".into()]))]);
        assert!(chain.is_enabled("pages-plugin").await);
        assert!(chain.is_enabled("pages").await);
        assert!(!chain.is_enabled("admin").await);
    }

    #[tokio::test]
    async fn test_paths_file_fallback_for_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = Arc::new(PathRegistry::new(tmp.path().join("plugin-paths.json")));
        paths
            .register("pages", std::path::Path::new("/plugins/pages"))
            .unwrap();

        let chain = SourceChain::new(vec![Box::new(PathsFileSource::new(paths))]);
        assert!(chain.is_installed("pages").await);
        assert!(!chain.is_installed("admin").await);
        // Paths file knows nothing about enabled state.
        assert!(!chain.is_enabled("pages").await);
    }

    #[tokio::test]
    async fn test_empty_chain_defaults_false() {
        let chain = SourceChain::new(Vec::new());
        assert!(!chain.is_enabled("anything").await);
        assert!(!chain.is_installed("anything").await);
    }
}
