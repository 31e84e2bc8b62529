// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling, one depth level at a time
// - Concurrent downloads and link extraction in two bounded pools
// - A per-host limit on concurrent downloads
// - Optional restriction to a list of hosts
// - Failed downloads are collected, never fatal to the crawl
//
// Submodules:
// - crawler: WebCrawler, the pools and the level-by-level driver loop
// - job: the state shared by all tasks of one crawl
// - gate: per-host download limits
// - barrier: waits for a level's dynamically spawned tasks
// - result: CrawlResult
// =============================================================================

mod barrier;
mod crawler;
mod gate;
mod job;
mod result;

pub use crawler::WebCrawler;
pub use job::Scope;
pub use result::CrawlResult;
