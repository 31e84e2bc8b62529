// src/main.rs
// =============================================================================
// This is the entry point of the web-crawler binary.
//
// What happens here:
// 1. Set up logging (to stderr, so JSON on stdout stays clean)
// 2. Parse command-line arguments using clap
// 3. Build the downloader (plain HTTP, or HTTP behind a disk cache)
// 4. Run the crawl and print the results
// 5. Exit with proper code (0 = all pages downloaded, 1 = some failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use web_crawler::{CachingDownloader, CrawlResult, Downloader, HttpDownloader, WebCrawler};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default filter, e.g. RUST_LOG=web_crawler=debug
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("web_crawler=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = every page downloaded
//   Ok(1) = some pages failed
//   Err = bad arguments or the crawler could not be set up
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let downloader = build_downloader(&cli).await?;
    let crawler = WebCrawler::new(downloader, cli.crawler_config())
        .context("failed to set up the crawler")?;

    println!("🔍 Crawling: {}", cli.url);
    println!("📊 Depth: {}", cli.depth);
    let config = crawler.config();
    println!(
        "⚙️  Limits: {} downloaders, {} extractors, {} per host",
        config.downloaders, config.extractors, config.per_host
    );
    if !cli.hosts.is_empty() {
        println!("🌐 Hosts: {}", cli.hosts.join(", "));
    }

    let result = if cli.hosts.is_empty() {
        crawler.download(&cli.url, cli.depth).await
    } else {
        crawler.download_within(&cli.url, cli.depth, cli.hosts.iter().cloned()).await
    };
    crawler.close().await;
    let result = result?;

    print_results(&result, cli.json)?;

    if result.errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

async fn build_downloader(cli: &Cli) -> Result<Arc<dyn Downloader>> {
    let http = HttpDownloader::new(Duration::from_secs(cli.timeout_secs))
        .context("failed to create HTTP client")?;

    match &cli.cache_dir {
        Some(dir) => {
            let cached = CachingDownloader::new(http, dir)
                .await
                .with_context(|| format!("failed to open page cache {}", dir.display()))?;
            Ok(Arc::new(cached))
        }
        None => Ok(Arc::new(http)),
    }
}

// Prints the results either as a table or JSON
fn print_results(result: &CrawlResult, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        print_table(result);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(result: &CrawlResult) {
    println!("{:<70} {:<30}", "URL", "STATUS");
    println!("{}", "=".repeat(100));

    for url in &result.downloaded {
        println!("{:<70} {:<30}", truncate(url, 67), "✅ OK");
    }
    for (url, message) in result.error_messages() {
        println!("{:<70} ❌ {}", truncate(url, 67), message);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Downloaded: {}", result.downloaded.len());
    println!("   ❌ Failed: {}", result.errors.len());
}

// Truncate URL if too long for display
fn truncate(url: &str, max: usize) -> String {
    match url.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}
