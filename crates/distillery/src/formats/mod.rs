// ABOUTME: Output format converters and document-level text helpers.
// ABOUTME: Handles conversion to Markdown and plain text, plus title and excerpt extraction.

//! Output format conversion module.
//!
//! Distilled content is produced as HTML. This module turns it into Markdown
//! or plain text and pulls the title and excerpt reported alongside it.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::dom::DomTree;
use crate::error::DistillError;

static BR_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static HORIZONTAL_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// Preprocess HTML before conversion: replace <br> tags with newlines.
fn preprocess_br_tags(html: &str) -> String {
    BR_TAG_RE.replace_all(html, "\n").to_string()
}

/// Collapse more than 2 consecutive blank lines to exactly 2.
fn collapse_blank_lines_to_two(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").to_string()
}

/// Collapse multiple consecutive newlines to a single newline.
fn collapse_newlines_to_one(text: &str) -> String {
    NEWLINES_RE.replace_all(text, "\n").to_string()
}

/// Convert HTML to Markdown using htmd.
///
/// Skips script and style tags, keeps links and images, and normalizes runs
/// of blank lines to at most two.
pub fn html_to_markdown(html: &str) -> Result<String, DistillError> {
    let preprocessed = preprocess_br_tags(html);

    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .build();

    let md = converter
        .convert(&preprocessed)
        .map_err(|e| DistillError::render("convert to markdown", Some(e.into())))?;

    Ok(collapse_blank_lines_to_two(&md))
}

/// Convert HTML to plain text by extracting text nodes.
///
/// Treats <br> as newline, collapses blank lines and horizontal whitespace,
/// and trims the result.
pub fn html_to_text(html: &str) -> String {
    let preprocessed = preprocess_br_tags(html);

    let fragment = Html::parse_fragment(&preprocessed);
    let raw_text: String = fragment.root_element().text().collect::<Vec<_>>().join(" ");

    let normalized = HORIZONTAL_SPACE_RE.replace_all(&raw_text, " ");
    let collapsed = collapse_newlines_to_one(&normalized);

    collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Extract the document title.
///
/// Tries `<title>`, then `meta[property=og:title]`, then the first `<h1>`.
/// Must run before preprocessing strips `head`.
pub fn extract_title<T: DomTree>(tree: &T) -> Option<String> {
    let root = tree.root();

    let from_text = |tag: &str| {
        tree.find_by_tag(root, tag)
            .into_iter()
            .map(|node| normalize_spaces(&tree.text(node)))
            .find(|text| !text.is_empty())
    };

    if let Some(title) = from_text("title") {
        return Some(title);
    }

    let og_title = tree
        .find_by_tag(root, "meta")
        .into_iter()
        .filter(|&meta| tree.attr(meta, "property") == Some("og:title"))
        .filter_map(|meta| tree.attr(meta, "content"))
        .map(normalize_spaces)
        .find(|content| !content.is_empty());
    if og_title.is_some() {
        return og_title;
    }

    from_text("h1")
}

/// Extract excerpt from HTML.
///
/// Returns the first 200 characters of the plain text, or None if there is
/// no text at all.
pub fn extract_excerpt(html: &str) -> Option<String> {
    let text = html_to_text(html);
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(200).collect())
}

/// Normalize whitespace in text.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScraperTree;
    use pretty_assertions::assert_eq;

    #[test]
    fn html_to_markdown_converts_headings_and_emphasis() {
        let html = "<h2>Title</h2><p>Some <strong>bold</strong> text.</p>";
        let md = html_to_markdown(html).unwrap();
        assert!(md.contains("## Title"), "expected markdown h2, got: {}", md);
        assert!(md.contains("**bold**"), "expected bold markdown, got: {}", md);
    }

    #[test]
    fn html_to_markdown_skips_script_and_style() {
        let html = "<p>Before</p><script>alert(1)</script><style>.x{}</style><p>After</p>";
        let md = html_to_markdown(html).unwrap();
        assert!(!md.contains("alert"), "got: {}", md);
        assert!(!md.contains(".x{}"), "got: {}", md);
        assert!(md.contains("Before") && md.contains("After"), "got: {}", md);
    }

    #[test]
    fn html_to_markdown_preserves_links() {
        let html = r#"<p>Visit <a href="https://example.com">Example</a></p>"#;
        let md = html_to_markdown(html).unwrap();
        assert!(
            md.contains("[Example](https://example.com)"),
            "should preserve link, got: {}",
            md
        );
    }

    #[test]
    fn html_to_markdown_collapses_excessive_blank_lines() {
        let md = html_to_markdown("<p>Para 1</p>\n\n\n\n\n<p>Para 2</p>").unwrap();
        assert!(!md.contains("\n\n\n"), "got: {:?}", md);
    }

    #[test]
    fn html_to_text_strips_tags_and_collapses_whitespace() {
        assert_eq!(html_to_text("<p>Hello   world</p>"), "Hello world");
        assert_eq!(
            html_to_text("<div><span>One</span> <em>Two</em> <strong>Three</strong></div>"),
            "One Two Three"
        );
        assert_eq!(html_to_text("   <p>  trimmed  </p>   "), "trimmed");
    }

    #[test]
    fn html_to_text_converts_br_to_newline() {
        assert_eq!(html_to_text("<p>Line 1<br>Line 2</p>"), "Line 1\nLine 2");
    }

    #[test]
    fn html_to_text_collapses_multiple_newlines() {
        let text = html_to_text("<p>Para 1</p>\n\n\n\n<p>Para 2</p>");
        assert!(!text.contains("\n\n"), "got: {:?}", text);
        assert!(text.contains("Para 1") && text.contains("Para 2"));
    }

    #[test]
    fn extract_title_prefers_title_tag() {
        let tree = ScraperTree::parse(
            "<html><head><title>  Page   Title </title></head><body><h1>Heading</h1></body></html>",
        );
        assert_eq!(extract_title(&tree), Some("Page Title".to_string()));
    }

    #[test]
    fn extract_title_uses_og_title_then_h1() {
        let tree = ScraperTree::parse(
            r#"<html><head><meta property="og:title" content="Social Title"></head><body><h1>H</h1></body></html>"#,
        );
        assert_eq!(extract_title(&tree), Some("Social Title".to_string()));

        let tree = ScraperTree::parse("<html><body><h1>Main Heading</h1></body></html>");
        assert_eq!(extract_title(&tree), Some("Main Heading".to_string()));
    }

    #[test]
    fn extract_title_returns_none_without_candidates() {
        let tree = ScraperTree::parse("<html><body><p>Just a paragraph</p></body></html>");
        assert_eq!(extract_title(&tree), None);
    }

    #[test]
    fn extract_excerpt_truncates_long_text() {
        let html = format!("<p>{}</p>", "a".repeat(300));
        assert_eq!(extract_excerpt(&html), Some("a".repeat(200)));
        assert_eq!(extract_excerpt("<div> </div>"), None);
    }

    #[test]
    fn preprocess_br_handles_variants() {
        assert_eq!(preprocess_br_tags("<br>"), "\n");
        assert_eq!(preprocess_br_tags("<br/>"), "\n");
        assert_eq!(preprocess_br_tags("<BR />"), "\n");
    }

    #[test]
    fn collapse_helpers() {
        assert_eq!(collapse_blank_lines_to_two("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_newlines_to_one("a\n\n\nb"), "a\nb");
    }
}
