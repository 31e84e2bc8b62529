// src/crawl/result.rs
// =============================================================================
// What a crawl job hands back: the pages that were downloaded, in the order
// their downloads completed, and the pages that failed with the reason.
// =============================================================================

use crate::error::DownloadError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct CrawlResult {
    /// Successfully downloaded URLs, each at most once
    pub downloaded: Vec<String>,
    /// URLs whose download failed, with the failure
    pub errors: HashMap<String, DownloadError>,
}

impl CrawlResult {
    /// True when nothing was downloaded and nothing failed
    pub fn is_empty(&self) -> bool {
        self.downloaded.is_empty() && self.errors.is_empty()
    }

    /// Failure descriptions keyed by URL, sorted for stable output
    pub fn error_messages(&self) -> BTreeMap<&str, String> {
        self.errors
            .iter()
            .map(|(url, err)| (url.as_str(), err.to_string()))
            .collect()
    }
}

// DownloadError wraps non-serializable errors (io, reqwest), so errors are
// written as their display text
impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("downloaded", &self.downloaded)?;
        state.serialize_field("errors", &self.error_messages())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_errors_as_text() {
        let mut result = CrawlResult::default();
        result.downloaded.push("http://a/1".to_string());
        result
            .errors
            .insert("http://a/2".to_string(), DownloadError::Status { status: 500 });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["downloaded"][0], "http://a/1");
        assert_eq!(json["errors"]["http://a/2"], "HTTP 500");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(CrawlResult::default().is_empty());
    }
}
