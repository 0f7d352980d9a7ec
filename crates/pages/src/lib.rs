//! Markdown-backed content pages.
//!
//! The content counterpart of plugin discovery: one markdown file per page,
//! front matter for metadata, no persisted state. Ordering and publication
//! are entirely front-matter-driven.

pub mod discover;
pub mod frontmatter;
pub mod render;
pub mod types;

pub use {
    discover::{PageDiscovery, humanize_slug, validate_slug},
    types::Page,
};
