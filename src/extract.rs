//! HTML-to-plain-text extraction and metadata synthesis.
//!
//! Extraction deliberately discards all document structure (links, images,
//! formatting) in favor of a single normalized plain-text artifact that
//! stores and diffs cleanly in a text-oriented Git repository.

use chrono::{DateTime, Local, Utc};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Title substituted when a page has no usable `<title>`.
const UNTITLED: &str = "Untitled";

/// Metadata recorded alongside every stored post.
///
/// `date` is the retrieval time, set once at extraction and immutable
/// afterwards. One `Metadata` maps 1:1 to exactly one stored content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title, never empty (defaults to `"Untitled"`).
    pub title: String,
    /// Source URL the post was retrieved from.
    pub url: String,
    /// Retrieval time.
    pub date: DateTime<Utc>,
    /// Value of `<meta name="description">`, possibly empty.
    pub description: String,
    /// Value of `<meta name="author">`, possibly empty.
    pub author: String,
}

/// Result of extracting a page: normalized plain text plus its metadata.
#[derive(Debug)]
pub struct ExtractedPost {
    pub plain_text: String,
    pub metadata: Metadata,
}

/// Extract normalized plain text and metadata from raw HTML.
///
/// No I/O; the only non-determinism is the clock read for the `date` field
/// and the `Retrieved:` line. Missing titles and meta tags are tolerated by
/// substituting defaults rather than failing.
///
/// The plain text follows a fixed template: a `# {title}` heading, a blank
/// line, `Source:` and `Retrieved:` lines, a blank line, then the flattened
/// whitespace-collapsed text of the document body with a trailing newline.
pub fn extract_content(html: &str, url: &str) -> ExtractedPost {
    let document = Html::parse_document(html);

    let title = page_title(&document);
    let metadata = Metadata {
        title: title.clone(),
        url: url.to_string(),
        date: Utc::now(),
        description: meta_content(&document, "description"),
        author: meta_content(&document, "author"),
    };

    let mut plain_text = String::new();
    plain_text.push_str(&format!("# {title}\n\n"));
    plain_text.push_str(&format!("Source: {url}\n"));
    plain_text.push_str(&format!(
        "Retrieved: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    plain_text.push_str(body_text(&document).trim());
    plain_text.push('\n');

    ExtractedPost {
        plain_text,
        metadata,
    }
}

/// Text of the first `<title>` element, trimmed; `"Untitled"` when absent
/// or empty.
fn page_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return UNTITLED.to_string();
    };
    let title = document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Content attribute of `<meta name="{name}">`, or empty string.
fn meta_content(document: &Html, name: &str) -> String {
    let Ok(selector) = Selector::parse(&format!(r#"meta[name="{name}"]"#)) else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

/// Flattened, whitespace-collapsed text content of the document body.
fn body_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&selector).next() else {
        return String::new();
    };
    body.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
