use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level FilaMan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilamanConfig {
    pub plugins: PluginsConfig,
    pub pages: PagesConfig,
    pub database: DatabaseConfig,
}

/// Plugin discovery and fallback settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Directory scanned for plugin directories. Defaults to `./plugins`.
    pub dir: Option<PathBuf>,
    /// Short plugin names treated as enabled before the state table exists.
    pub enabled: Vec<String>,
}

/// Markdown pages settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory scanned for `.md` page files. Defaults to `./pages`.
    pub dir: Option<PathBuf>,
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL. Defaults to `sqlite://<data_dir>/filaman.db?mode=rwc`.
    pub url: Option<String>,
}

impl FilamanConfig {
    /// Plugins directory, resolved against `cwd` when relative or absent.
    pub fn plugins_dir(&self, cwd: &Path) -> PathBuf {
        match &self.plugins.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("plugins"),
        }
    }

    /// Pages directory, resolved against `cwd` when relative or absent.
    pub fn pages_dir(&self, cwd: &Path) -> PathBuf {
        match &self.pages.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("pages"),
        }
    }

    /// Database URL, defaulting to a SQLite file under the data directory.
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite://{}?mode=rwc",
                crate::loader::data_dir().join("filaman.db").display()
            ),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dirs_resolve_against_cwd() {
        let cfg = FilamanConfig::default();
        let cwd = Path::new("/srv/app");
        assert_eq!(cfg.plugins_dir(cwd), Path::new("/srv/app/plugins"));
        assert_eq!(cfg.pages_dir(cwd), Path::new("/srv/app/pages"));
    }

    #[test]
    fn test_absolute_dirs_kept() {
        let cfg = FilamanConfig {
            plugins: PluginsConfig {
                dir: Some("/opt/plugins".into()),
                enabled: vec![],
            },
            ..Default::default()
        };
        assert_eq!(
            cfg.plugins_dir(Path::new("/srv/app")),
            Path::new("/opt/plugins")
        );
    }

    #[test]
    fn test_parse_toml() {
        let cfg: FilamanConfig = toml::from_str(
            r#"
            [plugins]
            dir = "packages"
            enabled = ["admin", "pages"]

            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.plugins.enabled, vec!["admin", "pages"]);
        assert_eq!(cfg.database_url(), "sqlite::memory:");
    }
}
