// src/crawl/crawler.rs
// =============================================================================
// The breadth-first crawler.
//
// How it works:
// 1. The start URL is the frontier of level 0
// 2. Every frontier URL gets a download task
// 3. A downloaded page that is not on the last level gets an extract task,
//    which queues new in-scope links for the next level
// 4. The driver waits on the level barrier until all download and extract
//    tasks of the level are done, then the next-level set becomes the frontier
// 5. After `depth` levels the accumulated results are returned
//
// Concurrency limits:
// - at most `downloaders` downloads and `extractors` extractions at once
//   (one semaphore per pool; excess tasks wait for a slot)
// - at most `per_host` downloads from one host at once (HostGates)
//
// Rust concepts:
// - Arc: tasks are 'static, so they share the job and the pools by refcount
// - tokio::select!: races a task against the crawler's cancellation token
// =============================================================================

use super::barrier::LevelBarrier;
use super::job::{CrawlJob, Scope};
use super::result::CrawlResult;
use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::fetch::{Document, Downloader};
use crate::urls::host_of;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

// Everything a running task needs from the crawler
struct Pools {
    downloader: Arc<dyn Downloader>,
    download_slots: Semaphore,
    extract_slots: Semaphore,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

pub struct WebCrawler {
    pools: Arc<Pools>,
    config: CrawlerConfig,
    closed: AtomicBool,
}

impl WebCrawler {
    /// Creates a crawler
    ///
    /// Fails if any limit in `config` is zero.
    pub fn new(downloader: Arc<dyn Downloader>, config: CrawlerConfig) -> Result<Self, CrawlerError> {
        config.validate()?;

        let pools = Pools {
            downloader,
            download_slots: Semaphore::new(config.downloaders),
            extract_slots: Semaphore::new(config.extractors),
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        };

        Ok(Self {
            pools: Arc::new(pools),
            config,
            closed: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls from `url` for `depth` levels, following links to any host
    pub async fn download(&self, url: &str, depth: usize) -> Result<CrawlResult, CrawlerError> {
        self.crawl(url, depth, Scope::Any).await
    }

    /// Crawls from `url` for `depth` levels, following links only to `hosts`
    ///
    /// The start URL is downloaded even if its host is not listed.
    pub async fn download_within<I, S>(
        &self,
        url: &str,
        depth: usize,
        hosts: I,
    ) -> Result<CrawlResult, CrawlerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.crawl(url, depth, Scope::hosts(hosts)).await
    }

    /// Crawls from `url` for `depth` levels within `scope`
    pub async fn crawl(&self, url: &str, depth: usize, scope: Scope) -> Result<CrawlResult, CrawlerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CrawlerError::Closed);
        }

        let job = Arc::new(CrawlJob::new(scope, depth, self.config.per_host));
        job.admit_seed(url);
        tracing::info!(url, depth, "crawl started");

        for level in 0..depth {
            let frontier = job.take_frontier();
            if frontier.is_empty() {
                break;
            }

            tracing::info!(level, urls = frontier.len(), "downloading level");
            for url in frontier {
                self.pools.submit_download(&job, url, level);
            }
            job.barrier.wait().await;
        }

        let result = job.finish();
        tracing::info!(
            downloaded = result.downloaded.len(),
            errors = result.errors.len(),
            "crawl finished"
        );
        Ok(result)
    }

    /// Shuts the worker pools down
    ///
    /// Running and queued tasks get `shutdown_grace` to finish. After that
    /// the pools accept no more work and whatever is left is cancelled. Calling close() again does nothing, and
    /// later download calls fail with CrawlerError::Closed.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let grace = self.config.shutdown_grace;
        let pools = &self.pools;
        pools.tracker.close();
        let drained = tokio::time::timeout(grace, pools.tracker.wait()).await.is_ok();

        // A job still between levels must not start new work after close()
        pools.download_slots.close();
        pools.extract_slots.close();

        if drained {
            tracing::debug!("worker pools shut down");
            return;
        }

        tracing::warn!(?grace, tasks = pools.tracker.len(), "tasks still running, cancelling");
        pools.cancel.cancel();

        if tokio::time::timeout(grace, pools.tracker.wait()).await.is_err() {
            tracing::warn!(tasks = pools.tracker.len(), "worker pools did not terminate");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Drop for WebCrawler {
    // Outstanding tasks must not outlive the crawler that owns the pools
    fn drop(&mut self) {
        self.pools.cancel.cancel();
    }
}

impl Pools {
    // Registers `work` with the level barrier, then runs it on the runtime
    //
    // The ticket is taken here, before spawning, and released when the task
    // ends however it ends.
    fn spawn_on_level<F>(&self, barrier: &Arc<LevelBarrier>, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = barrier.register();
        let cancel = self.cancel.clone();

        self.tracker.spawn(async move {
            let _ticket = ticket;
            tokio::select! {
                _ = cancel.cancelled() => tracing::debug!("task cancelled"),
                _ = work => {}
            }
        });
    }

    fn submit_download(self: &Arc<Self>, job: &Arc<CrawlJob>, url: String, level: usize) {
        let pools = Arc::clone(self);
        let task_job = Arc::clone(job);
        self.spawn_on_level(&job.barrier, async move {
            pools.run_download(&task_job, url, level).await;
        });
    }

    fn submit_extract(self: &Arc<Self>, job: &Arc<CrawlJob>, document: Box<dyn Document>) {
        let pools = Arc::clone(self);
        let task_job = Arc::clone(job);
        self.spawn_on_level(&job.barrier, async move {
            pools.run_extract(&task_job, document).await;
        });
    }

    async fn run_download(self: &Arc<Self>, job: &Arc<CrawlJob>, url: String, level: usize) {
        let host = match host_of(&url) {
            Ok(host) => host,
            Err(e) => {
                tracing::debug!(error = %e, "skipping download");
                return;
            }
        };

        // A closed pool means the crawler is being torn down
        let Ok(_slot) = self.download_slots.acquire().await else {
            return;
        };

        let downloaded = {
            let Some(_permit) = job.gates.acquire(&host).await else {
                return;
            };
            self.downloader.download(&url).await
        };

        match downloaded {
            Ok(document) => {
                tracing::debug!(url = %url, level, "downloaded");
                job.record_success(url);
                if job.expands(level) {
                    self.submit_extract(job, document);
                }
            }
            Err(e) => {
                tracing::debug!(url = %url, level, error = %e, "download failed");
                job.record_failure(url, e);
            }
        }
    }

    async fn run_extract(&self, job: &CrawlJob, document: Box<dyn Document>) {
        let Ok(_slot) = self.extract_slots.acquire().await else {
            return;
        };

        match document.extract_links().await {
            Ok(links) => {
                let found = links.len();
                let admitted = links.iter().filter(|link| job.admit(link)).count();
                tracing::debug!(found, admitted, "links extracted");
            }
            Err(e) => tracing::debug!(error = %e, "link extraction failed"),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Semaphore per pool instead of N worker tasks?
//    - Every download becomes its own tokio task, which waits for a slot
//    - At most `downloaders` tasks hold a slot, the rest queue on acquire()
//    - Same effect as a fixed thread pool, without a shared job queue
//
// 2. What does `let Ok(x) = ... else { return; }` do?
//    - It is "let-else": bind on success, otherwise run the else block
//    - The else block must leave the function (return, break, ...)
//
// 3. Why is `_permit` inside its own { } block?
//    - A permit is released when it is dropped
//    - Ending the block right after the download gives the host's slot back
//      before we record results and spawn the extract task
// -----------------------------------------------------------------------------
