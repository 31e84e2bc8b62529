// src/fetch/cache.rs
// =============================================================================
// A downloader with an on-disk page cache in front of the network.
//
// Each page is stored as one file named after the SHA-256 of its URL, so the
// same URL always maps to the same file and no URL escaping is needed.
// A cache hit never touches the network. Failing to write a cache file only
// costs a warning: the page was downloaded fine.
// =============================================================================

use super::{Document, Downloader, HtmlDocument, HttpDownloader};
use crate::error::DownloadError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct CachingDownloader {
    http: HttpDownloader,
    dir: PathBuf,
}

impl CachingDownloader {
    /// Creates the cache directory if it does not exist yet
    pub async fn new(http: HttpDownloader, dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { http, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn cache_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.html", hex::encode(digest)))
    }

    async fn read_cached(&self, path: &Path) -> Result<Option<String>, DownloadError> {
        match tokio::fs::read_to_string(path).await {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Downloader for CachingDownloader {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError> {
        let path = self.cache_path(url);

        if let Some(html) = self.read_cached(&path).await? {
            tracing::debug!(url, "page cache hit");
            return Ok(Box::new(HtmlDocument::new(url, html)));
        }

        let html = self.http.fetch_html(url).await?;
        if let Err(e) = tokio::fs::write(&path, html.as_bytes()).await {
            tracing::warn!(url, path = %path.display(), error = %e, "failed to write page cache");
        }

        Ok(Box::new(HtmlDocument::new(url, html)))
    }
}
