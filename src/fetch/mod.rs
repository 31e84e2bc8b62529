// src/fetch/mod.rs
// =============================================================================
// The capabilities the crawler consumes: downloading a page, and pulling the
// outbound links out of a downloaded page.
//
// The crawler only sees the two traits below. The implementations in this
// module are the ones the command line uses:
// - http: downloads pages over HTTP(S) with reqwest
// - cache: the same, with an on-disk page cache in front of the network
// - html: the document type both of them return
//
// Rust concepts:
// - Traits: describe a capability without fixing the implementation
// - async-trait: lets async trait methods be called through Box<dyn Trait>
// =============================================================================

mod cache;
mod html;
mod http;

pub use cache::CachingDownloader;
pub use html::{extract_html_links, HtmlDocument};
pub use http::{HttpDownloader, DEFAULT_TIMEOUT};

use crate::error::DownloadError;
use async_trait::async_trait;

/// Something that can turn a URL into a downloaded page
///
/// Implementations must be shareable across the crawler's worker tasks.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError>;
}

/// A downloaded page
#[async_trait]
pub trait Document: Send + Sync {
    /// Absolute URLs of the links found on the page
    async fn extract_links(&self) -> Result<Vec<String>, DownloadError>;
}
