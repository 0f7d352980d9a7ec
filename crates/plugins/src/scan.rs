//! Filesystem scanner for plugin directories.

use std::path::{Path, PathBuf};

use crate::{manifest, types::PluginManifest};

/// Scans a root directory for plugin directories, one level deep.
pub struct PluginScanner {
    root: PathBuf,
}

impl PluginScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan immediate subdirectories of the root for valid plugin manifests.
    ///
    /// A missing root yields an empty result, not an error. Results are
    /// sorted by plugin name so scan output is deterministic across
    /// filesystems.
    pub fn scan(&self) -> Vec<PluginManifest> {
        if !self.root.is_dir() {
            return Vec::new();
        }

        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), %e, "failed to read plugins directory");
                return Vec::new();
            },
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            if let Some(m) = manifest::read_manifest(&dir) {
                found.push(m);
            }
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }
}
