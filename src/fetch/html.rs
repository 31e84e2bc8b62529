// src/fetch/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// HtmlDocument is what both downloaders hand back to the crawler. Parsing is
// deferred until extract_links() is called, so pages on the last crawl level
// are never parsed at all.
// =============================================================================

use super::Document;
use crate::error::DownloadError;
use crate::urls::resolve_link;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// A downloaded HTML page
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    url: String,
    html: String,
}

impl HtmlDocument {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

#[async_trait]
impl Document for HtmlDocument {
    async fn extract_links(&self) -> Result<Vec<String>, DownloadError> {
        Ok(extract_html_links(&self.html, &self.url))
    }
}

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: absolute http(s) URLs in document order, each at most once
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // If the base URL is invalid we can't resolve relative links
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => {
            tracing::debug!(base_url, "invalid base URL, no links extracted");
            return links;
        }
    };

    let document = Html::parse_document(html);

    // "a[href]" is a constant selector, parsing it cannot fail
    let selector = Selector::parse("a[href]").expect("valid CSS selector");

    let mut seen = HashSet::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(&base, href) {
                if seen.insert(absolute_url.clone()) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "a[href]" means "all <a> tags that have an href attribute"
//
// 2. Why not parse in HtmlDocument::new?
//    - scraper's Html is not Send, so it cannot be kept across .await points
//      in a tokio task; the String can, and is parsed on demand
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_html_links(html, "https://example.com");
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let links = extract_html_links(html, "https://example.com/page");
        assert_eq!(links, vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_skip_mailto() {
        let html = r#"<a href="mailto:test@example.com">Email</a>"#;
        let links = extract_html_links(html, "https://example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicates_and_fragments_collapse() {
        let html = r#"
            <a href="/docs">Docs</a>
            <a href="/docs#install">Install</a>
            <a href="../about">About</a>
            <a href="https://rust-lang.org">Rust</a>
        "#;
        let links = extract_html_links(html, "https://example.com/page/");
        assert_eq!(
            links,
            vec![
                "https://example.com/docs",
                "https://example.com/about",
                "https://rust-lang.org/",
            ]
        );
    }

    #[tokio::test]
    async fn test_document_extracts_links() {
        let doc = HtmlDocument::new("http://a/1", r#"<a href="/2">two</a>"#);
        let links = doc.extract_links().await.unwrap();
        assert_eq!(links, vec!["http://a/2"]);
    }
}
