// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Usage:
//   web-crawler <URL> [DEPTH] [DOWNLOADERS] [EXTRACTORS] [PER_HOST]
//
// Every numeric argument is optional, defaults to 10 and must be at least 1.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use web_crawler::config::DEFAULT_LIMIT;
use web_crawler::fetch::DEFAULT_TIMEOUT;
use web_crawler::CrawlerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "web-crawler",
    version,
    about = "Crawls a website breadth-first up to a given depth",
    long_about = "web-crawler downloads a page, follows its links level by level up to the given depth, \
                  and reports every page it downloaded and every page that failed. Downloads run \
                  concurrently, with a limit on how many run against the same host at once."
)]
pub struct Cli {
    /// Start URL (e.g., https://example.com)
    pub url: String,

    /// Crawl depth: 1 = just the start page, 2 = the start page and the pages it links to, ...
    #[arg(default_value_t = DEFAULT_LIMIT, value_parser = parse_positive)]
    pub depth: usize,

    /// Maximum number of pages downloaded concurrently
    #[arg(default_value_t = DEFAULT_LIMIT, value_parser = parse_positive)]
    pub downloaders: usize,

    /// Maximum number of pages links are extracted from concurrently
    #[arg(default_value_t = DEFAULT_LIMIT, value_parser = parse_positive)]
    pub extractors: usize,

    /// Maximum number of concurrent downloads from a single host
    #[arg(default_value_t = DEFAULT_LIMIT, value_parser = parse_positive)]
    pub per_host: usize,

    /// Only follow links to this host (repeatable; the start page is always downloaded)
    #[arg(long = "host", value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Keep downloaded pages in this directory and reuse them on later runs
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_name = "SECS")]
    pub timeout_secs: u64,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::new(self.downloaders, self.extractors, self.per_host)
    }
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a number", value)),
    }
}
