//! Path registration for installed plugins.
//!
//! Installing a plugin records where it lives so dependency resolution can
//! find it later; uninstalling removes the entry. The file doubles as the
//! installed-state fallback when the plugin store is not ready yet.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// One registered plugin location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEntry {
    pub name: String,
    pub path: PathBuf,
}

/// On-disk shape of the path registration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsFile {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<PathEntry>,
}

impl Default for PathsFile {
    fn default() -> Self {
        Self {
            version: 1,
            entries: Vec::new(),
        }
    }
}

/// Persistent path registration with atomic writes.
pub struct PathRegistry {
    path: PathBuf,
}

impl PathRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the registration file, returning a default if missing.
    pub fn load(&self) -> Result<PathsFile> {
        if !self.path.exists() {
            return Ok(PathsFile::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save the registration file atomically via temp file + rename.
    pub fn save(&self, file: &PathsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(file)?;
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Register a plugin location. Idempotent: an existing entry for the
    /// same name is left untouched.
    pub fn register(&self, name: &str, plugin_path: &Path) -> Result<()> {
        let mut file = self.load()?;
        if file.entries.iter().any(|e| e.name == name) {
            return Ok(());
        }
        file.entries.push(PathEntry {
            name: name.to_string(),
            path: plugin_path.to_path_buf(),
        });
        self.save(&file)
    }

    /// Remove a plugin's entry. Idempotent when absent.
    pub fn unregister(&self, name: &str) -> Result<()> {
        let mut file = self.load()?;
        let before = file.entries.len();
        file.entries.retain(|e| e.name != name);
        if file.entries.len() == before {
            return Ok(());
        }
        self.save(&file)
    }

    /// Whether a plugin has a registered location.
    pub fn contains(&self, name: &str) -> bool {
        self.load()
            .map(|file| file.entries.iter().any(|e| e.name == name))
            .unwrap_or(false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
