// src/crawl/gate.rs
// =============================================================================
// Per-host admission control.
//
// Each host gets its own semaphore with `per_host` permits, so no host ever
// has more than `per_host` downloads in flight. Semaphores are created lazily
// the first time a host is seen and are never removed during a crawl job.
//
// Creation goes through DashMap's entry API, which locks the shard holding
// the key: when two tasks see a new host at the same moment, exactly one
// semaphore is created and both tasks get it.
// =============================================================================

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

pub(crate) struct HostGates {
    gates: DashMap<String, Arc<Semaphore>>,
    per_host: usize,
}

impl HostGates {
    pub(crate) fn new(per_host: usize) -> Self {
        Self {
            gates: DashMap::new(),
            per_host,
        }
    }

    /// Returns the gate for `host`, creating it if this is the first sighting
    pub(crate) fn ensure(&self, host: &str) -> Arc<Semaphore> {
        // Fast path without allocating the key
        let existing = self.gates.get(host).map(|gate| Arc::clone(gate.value()));
        if let Some(gate) = existing {
            return gate;
        }

        let gate = self
            .gates
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host)));
        Arc::clone(gate.value())
    }

    /// Waits for a download permit for `host`
    ///
    /// The permit goes back to the gate when it is dropped. Returns None only
    /// if the gate was closed, which this crawler never does.
    pub(crate) async fn acquire(&self, host: &str) -> Option<OwnedSemaphorePermit> {
        self.ensure(host).acquire_owned().await.ok()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.gates.len()
    }
}
