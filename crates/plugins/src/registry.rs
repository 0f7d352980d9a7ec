//! The plugin registry: discovery merged with persisted state, plus the
//! idempotent lifecycle operations (install, uninstall, enable, disable).

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    Result,
    error::Error,
    hooks::{self, CacheInvalidator, DependentReload, NoopInvalidator, PluginSetup},
    paths::PathRegistry,
    scan::PluginScanner,
    settings,
    sources::{ConfigListSource, PathsFileSource, SourceChain, StoreSource},
    store::PluginStore,
    types::{NewPluginRecord, PluginInfo},
};

/// Plugins that must never be uninstalled or disabled.
pub const CORE_PLUGINS: &[&str] = &["admin"];

/// Side-effect collaborators for lifecycle operations.
pub struct RegistryHooks {
    pub invalidator: Arc<dyn CacheInvalidator>,
    pub reloader: Option<Arc<dyn DependentReload>>,
    pub setup: Option<Arc<dyn PluginSetup>>,
}

impl Default for RegistryHooks {
    fn default() -> Self {
        Self {
            invalidator: Arc::new(NoopInvalidator),
            reloader: None,
            setup: None,
        }
    }
}

/// Registry over one plugins directory.
///
/// Scans the filesystem once at construction and keeps the merged view in
/// memory; the view is a snapshot, so concurrent mutations through another
/// registry instance are only visible after [`PluginRegistry::refresh`].
pub struct PluginRegistry {
    scanner: PluginScanner,
    store: Arc<dyn PluginStore>,
    paths: Arc<PathRegistry>,
    chain: SourceChain,
    hooks: RegistryHooks,
    available: BTreeMap<String, PluginInfo>,
}

impl PluginRegistry {
    /// Build a registry and perform the initial scan.
    ///
    /// `fallback_enabled` is the static list of short plugin names treated
    /// as enabled while the store's backing table does not exist yet.
    pub async fn new(
        scanner: PluginScanner,
        store: Arc<dyn PluginStore>,
        paths: Arc<PathRegistry>,
        fallback_enabled: Vec<String>,
        hooks: RegistryHooks,
    ) -> Self {
        let chain = SourceChain::new(vec![
            Box::new(StoreSource::new(Arc::clone(&store))),
            Box::new(PathsFileSource::new(Arc::clone(&paths))),
            Box::new(ConfigListSource::new(fallback_enabled)),
        ]);
        let mut registry = Self {
            scanner,
            store,
            paths,
            chain,
            hooks,
            available: BTreeMap::new(),
        };
        registry.refresh().await;
        registry
    }

    /// Re-scan the filesystem and re-derive installed/enabled status.
    pub async fn refresh(&mut self) {
        let mut available = BTreeMap::new();
        for manifest in self.scanner.scan() {
            let installed = self.chain.is_installed(&manifest.name).await;
            let enabled = self.chain.is_enabled(&manifest.name).await;
            available.insert(manifest.name.clone(), PluginInfo {
                manifest,
                installed,
                enabled,
            });
        }
        self.available = available;
    }

    // ── Read model ───────────────────────────────────────────────────────────

    /// All discovered plugins, installed or not, keyed by name.
    pub fn get_available(&self) -> &BTreeMap<String, PluginInfo> {
        &self.available
    }

    /// Discovered plugins with a state record.
    pub fn get_installed(&self) -> Vec<&PluginInfo> {
        self.available.values().filter(|p| p.installed).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PluginInfo> {
        self.available.get(name)
    }

    pub fn is_core_plugin(&self, name: &str) -> bool {
        CORE_PLUGINS.contains(&name)
    }

    /// Installed status through the source chain (store, then fallbacks).
    pub async fn is_plugin_installed(&self, name: &str) -> bool {
        self.chain.is_installed(name).await
    }

    /// Enabled status through the source chain (store, then fallbacks).
    pub async fn is_plugin_enabled(&self, name: &str) -> bool {
        self.chain.is_enabled(name).await
    }

    // ── Lifecycle operations ─────────────────────────────────────────────────

    /// Install a discovered plugin.
    ///
    /// Steps, in order: register the plugin's path for dependency
    /// resolution, run the dependent-system reload hook, run the plugin's
    /// own setup hook, write the state record (`enabled = true`), then
    /// invalidate caches. The record is not written until every fatal step
    /// has succeeded, so a failed install leaves the plugin uninstalled.
    pub async fn install(&mut self, name: &str) -> Result<()> {
        let manifest = self
            .available
            .get(name)
            .map(|info| info.manifest.clone())
            .ok_or_else(|| Error::plugin_not_found(name))?;

        self.paths.register(&manifest.name, &manifest.path)?;

        if let Some(reloader) = &self.hooks.reloader {
            reloader
                .reload()
                .await
                .map_err(|e| Error::dependent_system("dependent-system reload failed", e))?;
        }

        if let Some(setup) = &self.hooks.setup {
            setup
                .run(&manifest)
                .await
                .map_err(|e| Error::dependent_system("plugin setup failed", e))?;
        }

        self.store.upsert(&NewPluginRecord::from_manifest(&manifest)).await?;

        hooks::invalidate(self.hooks.invalidator.as_ref(), true);
        self.mark(name, |info| {
            info.installed = true;
            info.enabled = true;
        });
        tracing::info!(plugin = name, version = %manifest.version, "installed plugin");
        Ok(())
    }

    /// Uninstall a plugin. Idempotent: succeeds even when no record exists.
    /// The plugin directory itself is left on disk, so the plugin remains
    /// discoverable.
    pub async fn uninstall(&mut self, name: &str) -> Result<()> {
        if self.is_core_plugin(name) {
            return Err(Error::core_unit_protected(name));
        }

        self.store.delete(name).await?;
        self.paths.unregister(name)?;

        hooks::invalidate(self.hooks.invalidator.as_ref(), true);
        self.mark(name, |info| {
            info.installed = false;
            info.enabled = false;
        });
        tracing::info!(plugin = name, "uninstalled plugin");
        Ok(())
    }

    /// Enable a plugin. Idempotent, including for non-installed names.
    pub async fn enable(&mut self, name: &str) -> Result<()> {
        self.store.set_enabled(name, true).await?;
        hooks::invalidate(self.hooks.invalidator.as_ref(), false);
        // Re-derive rather than assume: enabling a non-installed name is a
        // store no-op and must not surface a phantom enabled plugin.
        let enabled = self.chain.is_enabled(name).await;
        self.mark(name, |info| info.enabled = enabled);
        tracing::info!(plugin = name, "enabled plugin");
        Ok(())
    }

    /// Disable a plugin. Idempotent; refuses core plugins.
    pub async fn disable(&mut self, name: &str) -> Result<()> {
        if self.is_core_plugin(name) {
            return Err(Error::core_unit_protected(name));
        }

        self.store.set_enabled(name, false).await?;
        hooks::invalidate(self.hooks.invalidator.as_ref(), false);
        self.mark(name, |info| info.enabled = false);
        tracing::info!(plugin = name, "disabled plugin");
        Ok(())
    }

    // ── Boolean façade ───────────────────────────────────────────────────────
    // Callers that only check a flag get these; the failure reason is logged
    // with the plugin name and still inspectable via the Result methods.

    pub async fn install_ok(&mut self, name: &str) -> bool {
        log_outcome("install", name, self.install(name).await)
    }

    pub async fn uninstall_ok(&mut self, name: &str) -> bool {
        log_outcome("uninstall", name, self.uninstall(name).await)
    }

    pub async fn enable_ok(&mut self, name: &str) -> bool {
        log_outcome("enable", name, self.enable(name).await)
    }

    pub async fn disable_ok(&mut self, name: &str) -> bool {
        log_outcome("disable", name, self.disable(name).await)
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    /// Read a plugin's settings blob, or one dotted-path key inside it.
    /// `None` when the plugin has no record or the key is absent.
    pub async fn get_config(
        &self,
        name: &str,
        key: Option<&str>,
    ) -> Result<Option<serde_json::Value>> {
        let Some(record) = self.store.get(name).await? else {
            return Ok(None);
        };
        let blob = record
            .settings
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        Ok(match key {
            None => Some(blob),
            Some(key) => settings::get_path(&blob, key).cloned(),
        })
    }

    /// Like [`PluginRegistry::get_config`], but returns `default` when the
    /// plugin has no record or the key is absent.
    pub async fn get_config_or(
        &self,
        name: &str,
        key: Option<&str>,
        default: serde_json::Value,
    ) -> Result<serde_json::Value> {
        Ok(self.get_config(name, key).await?.unwrap_or(default))
    }

    /// Set one dotted-path key in a plugin's settings blob, preserving
    /// unrelated keys (read-merge-write).
    pub async fn set_config(
        &self,
        name: &str,
        key: &str,
        value: serde_json::Value,
    ) -> Result<()> {
        let Some(record) = self.store.get(name).await? else {
            return Err(Error::plugin_not_found(name));
        };
        let mut blob = record
            .settings
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        settings::set_path(&mut blob, key, value);
        self.store.update_settings(name, &blob).await
    }

    fn mark(&mut self, name: &str, apply: impl FnOnce(&mut PluginInfo)) {
        if let Some(info) = self.available.get_mut(name) {
            apply(info);
        }
    }
}

fn log_outcome(op: &str, name: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(plugin = name, %e, "plugin {op} failed");
            false
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{store_memory::InMemoryStore, types::PluginRecord},
        std::path::Path,
    };

    fn write_plugin(root: &Path, dir_name: &str, manifest: &str) {
        let dir = root.join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("plugin.json"), manifest).unwrap();
    }

    async fn make_registry(root: &Path) -> PluginRegistry {
        let paths = Arc::new(PathRegistry::new(root.join("plugin-paths.json")));
        PluginRegistry::new(
            PluginScanner::new(root.join("plugins")),
            Arc::new(InMemoryStore::new()),
            paths,
            Vec::new(),
            RegistryHooks::default(),
        )
        .await
    }

    #[tokio::test]
    async fn test_install_requires_discovery() {
        let tmp = tempfile::tempdir().unwrap();
        let mut registry = make_registry(tmp.path()).await;

        let err = registry.install("ghost").await.unwrap_err();
        assert!(matches!(err, Error::PluginNotFound { .. }));
        assert!(!registry.install_ok("ghost").await);
    }

    #[tokio::test]
    async fn test_core_plugin_protected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut registry = make_registry(tmp.path()).await;

        assert!(registry.is_core_plugin("admin"));
        assert!(matches!(
            registry.uninstall("admin").await.unwrap_err(),
            Error::CoreUnitProtected { .. }
        ));
        assert!(matches!(
            registry.disable("admin").await.unwrap_err(),
            Error::CoreUnitProtected { .. }
        ));
        // Enable is allowed on core plugins.
        registry.enable("admin").await.unwrap();
    }

    #[tokio::test]
    async fn test_view_reflects_install_state() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin(
            &tmp.path().join("plugins"),
            "pages",
            r#"{"type": "filaman-plugin", "version": "2.0.0"}"#,
        );
        let mut registry = make_registry(tmp.path()).await;

        let info = registry.get("pages").unwrap();
        assert!(!info.installed);
        assert!(!info.enabled);

        registry.install("pages").await.unwrap();
        let info = registry.get("pages").unwrap();
        assert!(info.installed);
        assert!(info.enabled);
        assert_eq!(registry.get_installed().len(), 1);
    }

    #[tokio::test]
    async fn test_enable_nonexistent_does_not_install() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin(
            &tmp.path().join("plugins"),
            "pages",
            r#"{"type": "filaman-plugin"}"#,
        );
        let mut registry = make_registry(tmp.path()).await;

        registry.enable("pages").await.unwrap();
        assert!(!registry.is_plugin_installed("pages").await);
        // The view must not show a phantom enabled-but-not-installed plugin.
        assert!(!registry.get("pages").unwrap().enabled);
    }

    #[tokio::test]
    async fn test_set_config_requires_record() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = make_registry(tmp.path()).await;
        let err = registry
            .set_config("ghost", "a.b", serde_json::json!(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PluginNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_config_or_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin(
            &tmp.path().join("plugins"),
            "pages",
            r#"{"type": "filaman-plugin"}"#,
        );
        let mut registry = make_registry(tmp.path()).await;

        // No record at all: the default applies.
        let value = registry
            .get_config_or("ghost", Some("a.b"), serde_json::json!(1))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!(1));

        registry.install("pages").await.unwrap();
        registry
            .set_config("pages", "a.b", serde_json::json!(2))
            .await
            .unwrap();

        let value = registry
            .get_config_or("pages", Some("a.b"), serde_json::json!(1))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!(2));

        let value = registry
            .get_config_or("pages", Some("missing"), serde_json::json!(1))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!(1));
    }

    #[tokio::test]
    async fn test_install_version_from_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin(
            &tmp.path().join("plugins"),
            "alpha",
            r#"{"type": "filaman-plugin", "version": "2.0.0"}"#,
        );
        let store = Arc::new(InMemoryStore::new());
        let paths = Arc::new(PathRegistry::new(tmp.path().join("plugin-paths.json")));
        let mut registry = PluginRegistry::new(
            PluginScanner::new(tmp.path().join("plugins")),
            Arc::clone(&store) as Arc<dyn PluginStore>,
            paths,
            Vec::new(),
            RegistryHooks::default(),
        )
        .await;

        registry.install("alpha").await.unwrap();
        let record: PluginRecord = store.get("alpha").await.unwrap().unwrap();
        assert_eq!(record.version.as_deref(), Some("2.0.0"));
        assert!(record.enabled);
    }
}
