//! Markdown-to-HTML rendering for page bodies.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown body to HTML with the GitHub-flavored extensions the
/// pages expect (tables, strikethrough, task lists, footnotes).
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
