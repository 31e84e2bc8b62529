// src/lib.rs
// =============================================================================
// A concurrent breadth-first web crawler.
//
// Modules:
// - crawl: the crawler itself (WebCrawler, Scope, CrawlResult)
// - fetch: the Downloader / Document capabilities and their HTTP, cached
//   and HTML implementations
// - urls: host extraction and link resolution
// - config: crawler limits
// - error: error types
//
// Example:
//   let downloader = Arc::new(HttpDownloader::new(DEFAULT_TIMEOUT)?);
//   let crawler = WebCrawler::new(downloader, CrawlerConfig::default())?;
//   let result = crawler.download("https://example.com", 2).await?;
//   crawler.close().await;
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod urls;

pub use config::CrawlerConfig;
pub use crawl::{CrawlResult, Scope, WebCrawler};
pub use error::{CrawlerError, DownloadError};
pub use fetch::{CachingDownloader, Document, Downloader, HtmlDocument, HttpDownloader};
pub use urls::{host_of, normalize_host, MalformedUrl};
