// src/urls.rs
// =============================================================================
// URL helpers shared by the crawler and the HTML link extractor.
//
// - host_of: the admission-control key for a URL (its host name)
// - resolve_link: turns an href found on a page into an absolute URL
// =============================================================================

use thiserror::Error;
use url::Url;

/// The string could not be parsed as a URL with a host
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed URL '{url}'")]
pub struct MalformedUrl {
    pub url: String,
}

/// Extracts the host of a URL
///
/// Example:
///   host_of("https://Example.com:8080/docs") = Ok("example.com")
///   host_of("mailto:someone@example.com") = Err(MalformedUrl)
pub fn host_of(url: &str) -> Result<String, MalformedUrl> {
    let malformed = || MalformedUrl {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| malformed())?;
    parsed.host_str().map(str::to_string).ok_or_else(malformed)
}

/// Normalizes a host name written by a user the way host_of reports hosts
///
/// Example:
///   normalize_host("Example.com:8080") = "example.com"
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    match Url::parse(&format!("http://{}/", host)) {
        Ok(url) => match url.host_str() {
            Some(parsed) => parsed.to_string(),
            None => host.to_ascii_lowercase(),
        },
        Err(_) => host.to_ascii_lowercase(),
    }
}

// Resolves a link (possibly relative) to an absolute http(s) URL
//
// The fragment is dropped: "page#a" and "page#b" are the same document.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}
