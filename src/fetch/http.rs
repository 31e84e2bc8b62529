// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP(S).
//
// Key functionality:
// - One shared reqwest Client (connection pooling across all downloads)
// - Request timeout and a redirect limit
// - Non-2xx answers and non-HTML bodies are reported as download errors
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - ? operator: reqwest::Error converts into DownloadError via #[from]
// =============================================================================

use super::{Document, Downloader, HtmlDocument};
use crate::error::DownloadError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Downloads pages with reqwest
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    // Fetches a web page and returns its HTML content
    pub(crate) async fn fetch_html(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(DownloadError::NotHtml {
                    content_type: content_type.to_string(),
                });
            }
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError> {
        let html = self.fetch_html(url).await?;
        tracing::debug!(url, bytes = html.len(), "fetched page");
        Ok(Box::new(HtmlDocument::new(url, html)))
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpDownloader::new(DEFAULT_TIMEOUT).is_ok());
    }
}
