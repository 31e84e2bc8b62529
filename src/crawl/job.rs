// src/crawl/job.rs
// =============================================================================
// Shared state of one crawl job.
//
// A CrawlJob lives for exactly one WebCrawler::download call and is shared
// (through an Arc) by every download and extract task of that call:
// - seen: every URL ever admitted; a URL enters once and never leaves
// - gates: per-host download limits
// - next: URLs discovered for the next level
// - downloaded / errors: the result accumulator
// - barrier: counts the tasks still running on the current level
//
// Each structure protects its own invariant. No lock is ever held while
// another structure is touched.
// =============================================================================

use super::barrier::LevelBarrier;
use super::gate::HostGates;
use super::result::CrawlResult;
use crate::error::DownloadError;
use crate::urls::{host_of, normalize_host};
use dashmap::DashSet;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Which hosts a crawl may expand into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Follow links to any host
    Any,
    /// Follow links only to these hosts (as reported by host_of)
    Hosts(HashSet<String>),
}

impl Scope {
    /// Builds an allow-list; entries are lower-cased and any port is dropped
    pub fn hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scope::Hosts(
            hosts
                .into_iter()
                .map(|host| {
                    let host: String = host.into();
                    normalize_host(&host)
                })
                .collect(),
        )
    }

    pub fn allows(&self, host: &str) -> bool {
        match self {
            Scope::Any => true,
            Scope::Hosts(hosts) => hosts.contains(host),
        }
    }
}

pub(crate) struct CrawlJob {
    scope: Scope,
    depth: usize,
    seen: DashSet<String>,
    pub(crate) gates: HostGates,
    next: Mutex<Vec<String>>,
    downloaded: Mutex<Vec<String>>,
    errors: Mutex<HashMap<String, DownloadError>>,
    pub(crate) barrier: Arc<LevelBarrier>,
}

impl CrawlJob {
    pub(crate) fn new(scope: Scope, depth: usize, per_host: usize) -> Self {
        Self {
            scope,
            depth,
            seen: DashSet::new(),
            gates: HostGates::new(per_host),
            next: Mutex::new(Vec::new()),
            downloaded: Mutex::new(Vec::new()),
            errors: Mutex::new(HashMap::new()),
            barrier: LevelBarrier::new(),
        }
    }

    /// True when pages downloaded on `level` should have their links followed
    pub(crate) fn expands(&self, level: usize) -> bool {
        level + 1 < self.depth
    }

    /// Queues the start URL; it is exempt from the host scope
    pub(crate) fn admit_seed(&self, url: &str) -> bool {
        self.admit_with(url, true)
    }

    /// Queues a discovered link for the next level
    ///
    /// Returns false when the link is malformed, out of scope or was already
    /// seen by this job. The seen-set insert is the single point that decides
    /// admission, so concurrent extractors can never queue a URL twice.
    pub(crate) fn admit(&self, url: &str) -> bool {
        self.admit_with(url, false)
    }

    fn admit_with(&self, url: &str, ignore_scope: bool) -> bool {
        let host = match host_of(url) {
            Ok(host) => host,
            Err(e) => {
                tracing::debug!(error = %e, "dropping link");
                return false;
            }
        };

        if !ignore_scope && !self.scope.allows(&host) {
            return false;
        }
        if !self.seen.insert(url.to_string()) {
            return false;
        }

        // Created now so the first download of this host never races on it
        self.gates.ensure(&host);
        lock(&self.next).push(url.to_string());
        true
    }

    /// Hands out the URLs gathered for the next level and starts a fresh set
    pub(crate) fn take_frontier(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.next))
    }

    pub(crate) fn record_success(&self, url: String) {
        lock(&self.downloaded).push(url);
    }

    pub(crate) fn record_failure(&self, url: String, error: DownloadError) {
        lock(&self.errors).insert(url, error);
    }

    /// Moves the accumulated results out of the job
    pub(crate) fn finish(&self) -> CrawlResult {
        CrawlResult {
            downloaded: std::mem::take(&mut *lock(&self.downloaded)),
            errors: std::mem::take(&mut *lock(&self.errors)),
        }
    }
}

// A panicking task cannot leave these collections half-updated (every
// critical section is a single push/insert/take), so poisoning is ignored
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_allows() {
        assert!(Scope::Any.allows("anything"));
        let scope = Scope::hosts(["a", "b"]);
        assert!(scope.allows("a"));
        assert!(!scope.allows("c"));
    }

    #[test]
    fn test_scope_hosts_normalized() {
        let scope = Scope::hosts(["Example.com", "a:8080"]);
        assert!(scope.allows("example.com"));
        assert!(scope.allows("a"));

        let job = CrawlJob::new(scope, 2, 1);
        assert!(job.admit("http://EXAMPLE.com/docs"));
        assert!(job.admit("http://a:8080/1"));
    }

    #[test]
    fn test_admit_once() {
        let job = CrawlJob::new(Scope::Any, 3, 1);
        assert!(job.admit("http://a/1"));
        assert!(!job.admit("http://a/1"));
        assert_eq!(job.take_frontier(), vec!["http://a/1"]);
        assert!(job.take_frontier().is_empty());

        // Seen is job-wide, not per level
        assert!(!job.admit("http://a/1"));
    }

    #[test]
    fn test_admit_respects_scope_but_seed_is_exempt() {
        let job = CrawlJob::new(Scope::hosts(["a"]), 2, 1);
        assert!(job.admit_seed("http://seed/"));
        assert!(!job.admit("http://b/1"));
        assert!(job.admit("http://a/2"));
        assert_eq!(job.take_frontier(), vec!["http://seed/", "http://a/2"]);
    }

    #[test]
    fn test_admit_creates_gate_and_drops_malformed() {
        let job = CrawlJob::new(Scope::Any, 2, 4);
        assert!(!job.admit("not a url"));
        assert_eq!(job.gates.len(), 0);

        assert!(job.admit("http://a/1"));
        assert!(job.admit("http://a/2"));
        assert_eq!(job.gates.len(), 1);
    }

    #[test]
    fn test_expands() {
        let job = CrawlJob::new(Scope::Any, 2, 1);
        assert!(job.expands(0));
        assert!(!job.expands(1));
    }

    #[test]
    fn test_finish_moves_results() {
        let job = CrawlJob::new(Scope::Any, 1, 1);
        job.record_success("http://a/1".to_string());
        job.record_failure("http://a/2".to_string(), DownloadError::Status { status: 404 });

        let result = job.finish();
        assert_eq!(result.downloaded, vec!["http://a/1"]);
        assert_eq!(result.errors.len(), 1);
        assert!(job.finish().is_empty());
    }
}
