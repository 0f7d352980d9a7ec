//! Plugin manifest parsing.
//!
//! Each plugin directory carries a `plugin.json` describing the plugin.
//! A directory without a valid manifest of the right type is simply not a
//! plugin — absence, bad JSON, and wrong type marker all collapse to `None`.

use std::path::Path;

use serde::Deserialize;

use crate::types::{ManifestAuthor, PLUGIN_TYPE_MARKER, PluginManifest};

/// Fixed manifest filename inside each plugin directory.
pub const MANIFEST_FILENAME: &str = "plugin.json";

/// Raw manifest shape as it appears on disk. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    authors: Vec<ManifestAuthor>,
}

fn default_version() -> String {
    "dev".into()
}

/// Read and parse the manifest of the plugin rooted at `dir`.
///
/// Returns `None` when the manifest file is absent, unreadable, not valid
/// JSON, or its type marker is not [`PLUGIN_TYPE_MARKER`]. Malformed cases
/// are logged so operators can spot broken plugin directories.
pub fn read_manifest(dir: &Path) -> Option<PluginManifest> {
    let path = dir.join(MANIFEST_FILENAME);
    let content = std::fs::read_to_string(&path).ok()?;
    parse_manifest(&content, dir)
}

/// Parse manifest content for the plugin directory `dir`.
pub fn parse_manifest(content: &str, dir: &Path) -> Option<PluginManifest> {
    let raw: RawManifest = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), %e, "skipping plugin with malformed plugin.json");
            return None;
        },
    };

    if raw.kind != PLUGIN_TYPE_MARKER {
        tracing::debug!(dir = %dir.display(), kind = %raw.kind, "skipping directory with non-plugin manifest");
        return None;
    }

    let name = dir.file_name()?.to_str()?.to_string();
    Some(PluginManifest {
        package_name: raw.name.unwrap_or_else(|| name.clone()),
        name,
        description: raw.description,
        version: raw.version,
        authors: raw.authors,
        path: dir.to_path_buf(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"{
            "name": "filaman/pages-plugin",
            "type": "filaman-plugin",
            "description": "Markdown pages",
            "version": "2.0.0",
            "authors": [{"name": "Jane", "email": "jane@example.com"}]
        }"#;
        let m = parse_manifest(content, Path::new("/plugins/pages-plugin")).unwrap();
        assert_eq!(m.name, "pages-plugin");
        assert_eq!(m.package_name, "filaman/pages-plugin");
        assert_eq!(m.version, "2.0.0");
        assert_eq!(m.authors[0].name, "Jane");
        assert_eq!(m.path, Path::new("/plugins/pages-plugin"));
    }

    #[test]
    fn test_version_defaults_to_dev() {
        let content = r#"{"type": "filaman-plugin"}"#;
        let m = parse_manifest(content, Path::new("/plugins/bare")).unwrap();
        assert_eq!(m.version, "dev");
        // Package name falls back to the directory name.
        assert_eq!(m.package_name, "bare");
        assert_eq!(m.description, "");
    }

    #[test]
    fn test_wrong_type_marker_rejected() {
        let content = r#"{"name": "x", "type": "library"}"#;
        assert!(parse_manifest(content, Path::new("/plugins/x")).is_none());
    }

    #[test]
    fn test_missing_type_marker_rejected() {
        let content = r#"{"name": "x"}"#;
        assert!(parse_manifest(content, Path::new("/plugins/x")).is_none());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_manifest("{not json", Path::new("/plugins/x")).is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = r#"{"type": "filaman-plugin", "license": "MIT", "extra": {"a": 1}}"#;
        assert!(parse_manifest(content, Path::new("/plugins/x")).is_some());
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_manifest(tmp.path()).is_none());
    }

    #[test]
    fn test_read_manifest_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("demo-plugin");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("plugin.json"),
            r#"{"type": "filaman-plugin", "version": "1.2.3"}"#,
        )
        .unwrap();
        let m = read_manifest(&dir).unwrap();
        assert_eq!(m.name, "demo-plugin");
        assert_eq!(m.version, "1.2.3");
    }
}
