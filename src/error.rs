// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// There are two very different kinds of failure:
// - Per-URL failures (a page could not be downloaded). These never abort a
//   crawl; they end up in CrawlResult::errors as a DownloadError.
// - Crawler-level failures (bad configuration, crawler already closed).
//   These are returned from WebCrawler::new / WebCrawler::download as a
//   CrawlerError before any task is submitted.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert a lower-level error automatically
// =============================================================================

use thiserror::Error;

/// Why a single page could not be downloaded.
///
/// The Display text of this error is the "failure description" shown to
/// users next to the URL.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Local I/O failed (reading or creating the page cache, for example)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request itself failed (DNS, connect, timeout, TLS, ...)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The server answered with something we cannot extract links from
    #[error("not an HTML page (content type: {content_type})")]
    NotHtml { content_type: String },
}

/// Errors that stop a crawl before it starts.
#[derive(Debug, Error)]
pub enum CrawlerError {
    /// A construction parameter was out of range
    #[error("invalid crawler configuration: {0}")]
    InvalidConfig(String),

    /// close() was already called on this crawler
    #[error("crawler has been closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = DownloadError::Status { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DownloadError = io.into();
        assert!(matches!(err, DownloadError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
