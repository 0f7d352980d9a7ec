use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::schema::FilamanConfig;

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["filaman.toml", "filaman.yaml", "filaman.yml", "filaman.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<FilamanConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./filaman.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/filaman/filaman.{toml,yaml,yml,json}` (user-global)
///
/// Returns `FilamanConfig::default()` if no config file is found.
pub fn discover_and_load() -> FilamanConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    FilamanConfig::default()
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<FilamanConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let cfg = match ext {
        "toml" => toml::from_str(raw)?,
        "yaml" | "yml" => serde_yaml::from_str(raw)?,
        "json" => serde_json::from_str(raw)?,
        other => anyhow::bail!("unsupported config format: .{other}"),
    };
    Ok(cfg)
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "filaman") {
        for name in CONFIG_FILENAMES {
            let p = dirs.config_dir().join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Data directory for persistent state (database, plugin path registrations).
/// `FILAMAN_DATA_DIR` overrides the platform default.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FILAMAN_DATA_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "filaman")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".filaman"))
}
