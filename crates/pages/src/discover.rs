//! Markdown page discovery.
//!
//! Scans a pages directory one level deep for `.md` files, derives each
//! page's slug from its filename, and merges front matter with defaults.
//! Unlike plugins there is no persisted state: a page is "installed" when
//! its file exists and "enabled" when its front matter says published.

use std::path::{Path, PathBuf};

use crate::{frontmatter, types::Page};

/// Discovers pages under a single directory.
pub struct PageDiscovery {
    root: PathBuf,
}

impl PageDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan for markdown pages, sorted by (order ascending, title ascending).
    ///
    /// A missing root yields an empty result. Files with invalid slugs or
    /// unreadable content are excluded with a warning, never surfaced as
    /// errors.
    pub fn discover(&self) -> Vec<Page> {
        if !self.root.is_dir() {
            return Vec::new();
        }

        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), %e, "failed to read pages directory");
                return Vec::new();
            },
        };

        let mut pages = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(page) = self.load_page(&path) {
                pages.push(page);
            }
        }

        pages.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
        pages
    }

    /// Pages with `published: true` (the default), in discovery order.
    pub fn published_pages(&self) -> Vec<Page> {
        let mut pages = self.discover();
        pages.retain(|p| p.published);
        pages
    }

    /// Find a page by slug. Invalid slugs never hit the filesystem.
    pub fn find_by_slug(&self, slug: &str) -> Option<Page> {
        if !validate_slug(slug) {
            return None;
        }
        self.discover().into_iter().find(|p| p.slug == slug)
    }

    /// Whether a page file exists for the slug.
    pub fn page_exists(&self, slug: &str) -> bool {
        validate_slug(slug) && self.page_file_path(slug).is_file()
    }

    /// Path where the page for `slug` lives (or would live).
    pub fn page_file_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.md"))
    }

    fn load_page(&self, path: &Path) -> Option<Page> {
        let slug = path.file_stem()?.to_str()?.to_string();
        if !validate_slug(&slug) {
            tracing::warn!(path = %path.display(), "skipping page with invalid slug");
            return None;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "failed to read page file");
                return None;
            },
        };
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "skipping empty page file");
            return None;
        }

        let (matter, body) = frontmatter::parse_page_content(&content);
        Some(Page {
            title: matter.title.unwrap_or_else(|| humanize_slug(&slug)),
            slug,
            description: matter.description,
            order: matter.order,
            published: matter.published,
            author: matter.author,
            date: matter.date,
            tags: matter.tags,
            category: matter.category,
            body,
            path: path.to_path_buf(),
        })
    }
}

/// Slugs are filename-derived and end up in URLs: alphanumerics, hyphens,
/// and underscores only.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Title-case a slug: `getting-started` becomes `Getting Started`.
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
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

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn write_page(root: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(root).unwrap();
        std::fs::write(root.join(name), content).unwrap();
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("valid-slug_123"));
        assert!(validate_slug("a"));
        assert!(!validate_slug(""));
        assert!(!validate_slug("../evil"));
        assert!(!validate_slug("has spaces"));
        assert!(!validate_slug("bad@char"));
    }

    #[test]
    fn test_humanize_slug() {
        assert_eq!(humanize_slug("getting-started"), "Getting Started");
        assert_eq!(humanize_slug("about_us"), "About Us");
        assert_eq!(humanize_slug("faq"), "Faq");
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        assert!(PageDiscovery::new("/nonexistent/pages").discover().is_empty());
    }

    #[test]
    fn test_discover_applies_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "getting-started.md", "# Welcome\n");

        let pages = PageDiscovery::new(tmp.path()).discover();
        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.slug, "getting-started");
        assert_eq!(page.title, "Getting Started");
        assert_eq!(page.order, 999);
        assert!(page.published);
    }

    #[test]
    fn test_discover_skips_invalid_slugs_and_non_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "good.md", "content");
        write_page(tmp.path(), "has spaces.md", "content");
        write_page(tmp.path(), "bad@char.md", "content");
        write_page(tmp.path(), "notes.txt", "content");

        let pages = PageDiscovery::new(tmp.path()).discover();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "good");
    }

    #[test]
    fn test_sort_order_with_title_tiebreak() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "b.md", "---\ntitle: B\norder: 2\n---\nx");
        write_page(tmp.path(), "z.md", "---\ntitle: Z\norder: 1\n---\nx");
        write_page(tmp.path(), "a.md", "---\ntitle: A\norder: 1\n---\nx");

        let titles: Vec<_> = PageDiscovery::new(tmp.path())
            .discover()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["A", "Z", "B"]);
    }

    #[test]
    fn test_published_filter() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "draft.md", "---\npublished: false\n---\nx");
        write_page(tmp.path(), "live.md", "x");

        let discovery = PageDiscovery::new(tmp.path());
        assert_eq!(discovery.discover().len(), 2);

        let published = discovery.published_pages();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].slug, "live");
    }

    #[test]
    fn test_find_by_slug() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "about.md", "---\ntitle: About\n---\nx");

        let discovery = PageDiscovery::new(tmp.path());
        assert_eq!(discovery.find_by_slug("about").unwrap().title, "About");
        assert!(discovery.find_by_slug("missing").is_none());
        // Traversal attempts are rejected before touching the filesystem.
        assert!(discovery.find_by_slug("../about").is_none());
    }

    #[test]
    fn test_page_exists_and_path() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "about.md", "x");

        let discovery = PageDiscovery::new(tmp.path());
        assert!(discovery.page_exists("about"));
        assert!(!discovery.page_exists("missing"));
        assert!(!discovery.page_exists("../about"));
        assert_eq!(discovery.page_file_path("about"), tmp.path().join("about.md"));
    }

    #[test]
    fn test_discover_does_not_recurse() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(&tmp.path().join("nested"), "deep.md", "content");
        assert!(PageDiscovery::new(tmp.path()).discover().is_empty());
    }
}
