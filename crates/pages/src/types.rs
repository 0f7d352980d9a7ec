use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Front-matter keys recognized in a page header block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageFrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_order")]
    pub order: i64,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

pub(crate) fn default_order() -> i64 {
    999
}

pub(crate) fn default_published() -> bool {
    true
}

/// A discovered markdown page. "Installed" is simply "file exists on disk";
/// publication state lives entirely in the front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Filename-derived identifier, unique within the pages directory.
    pub slug: String,
    pub title: String,
    pub description: String,
    pub order: i64,
    pub published: bool,
    pub author: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// Markdown body without the front-matter block.
    pub body: String,
    /// Filesystem path of the source file.
    pub path: PathBuf,
}
