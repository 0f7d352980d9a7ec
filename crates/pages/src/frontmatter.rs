//! Front-matter splitting and parsing for markdown pages.

use crate::types::PageFrontMatter;

/// Split content at `---` delimiters into (front matter, body).
///
/// Lenient by design: content without a front-matter block (or with an
/// unterminated one) is treated as all body, not rejected.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return (None, content);
    };
    // The closer must be a line of exactly `---`; a body line that merely
    // starts with dashes does not end the block.
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if offset > 0 && line.trim() == "---" {
            let front = after_open[..offset].trim();
            let body = &after_open[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse a page file into its front matter and body.
///
/// Malformed YAML degrades to default metadata with the raw body kept, so
/// a broken header never hides a page's content outright.
pub fn parse_page_content(content: &str) -> (PageFrontMatter, String) {
    let (front, body) = split_front_matter(content);
    let matter = match front {
        Some(front) if !front.is_empty() => match serde_yaml::from_str(front) {
            Ok(matter) => matter,
            Err(e) => {
                tracing::warn!(%e, "malformed page front matter, using defaults");
                PageFrontMatter::default_with_published()
            },
        },
        _ => PageFrontMatter::default_with_published(),
    };
    (matter, body.to_string())
}

impl PageFrontMatter {
    /// `Default` derives `published: false` and `order: 0`; discovery
    /// defaults are published=true and order=999.
    pub(crate) fn default_with_published() -> Self {
        Self {
            published: crate::types::default_published(),
            order: crate::types::default_order(),
            ..Self::default()
        }
    }
}
