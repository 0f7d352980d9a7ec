use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Type marker a `plugin.json` must carry to be treated as a plugin.
pub const PLUGIN_TYPE_MARKER: &str = "filaman-plugin";

// ── Manifest ─────────────────────────────────────────────────────────────────

/// An author entry from a plugin manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Self-description of a plugin, parsed from its `plugin.json`.
///
/// Exists only as the result of a successful parse with a matching type
/// marker; wrong-type or malformed manifests never produce one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Registry identifier, derived from the plugin directory basename.
    pub name: String,
    /// Package-style name from the manifest (e.g. `filaman/pages-plugin`).
    pub package_name: String,
    #[serde(default)]
    pub description: String,
    /// Manifest version, `"dev"` when the manifest omits it.
    pub version: String,
    #[serde(default)]
    pub authors: Vec<ManifestAuthor>,
    /// Absolute path of the plugin directory.
    pub path: PathBuf,
}

// ── Persisted record ─────────────────────────────────────────────────────────

/// Persisted state for an installed plugin. Existence means "installed";
/// `enabled` means "active".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRecord {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub enabled: bool,
    pub settings: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl PluginRecord {
    /// Display label, falling back to a title-cased form of the plugin name
    /// with any `-plugin` suffix stripped.
    pub fn display_label(&self) -> String {
        match &self.display_name {
            Some(v) if !v.is_empty() => v.clone(),
            _ => humanize_name(&self.name),
        }
    }
}

/// Fields written on upsert; timestamps are store-managed.
#[derive(Debug, Clone, Default)]
pub struct NewPluginRecord {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub enabled: bool,
    pub settings: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
}

impl NewPluginRecord {
    /// Build the record written when a discovered plugin is installed.
    pub fn from_manifest(manifest: &PluginManifest) -> Self {
        Self {
            name: manifest.name.clone(),
            display_name: Some(manifest.package_name.clone()),
            description: Some(manifest.description.clone()),
            version: Some(manifest.version.clone()),
            author: manifest.authors.first().map(|a| a.name.clone()),
            url: None,
            enabled: true,
            settings: None,
            metadata: None,
        }
    }
}

// ── Registry view ────────────────────────────────────────────────────────────

/// Merged view of one discovered plugin: manifest data annotated with
/// installed/enabled status from the state store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    pub manifest: PluginManifest,
    pub installed: bool,
    pub enabled: bool,
}

/// Title-case a plugin name: `pages-plugin` becomes `Pages`.
pub fn humanize_name(name: &str) -> String {
    let base = name.strip_suffix("-plugin").unwrap_or(name);
    base.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
