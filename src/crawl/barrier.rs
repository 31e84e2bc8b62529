// src/crawl/barrier.rs
// =============================================================================
// The barrier between crawl levels.
//
// The number of tasks on a level is not known up front: download tasks spawn
// extract tasks while the level is running. So instead of joining a fixed set
// of handles, every task takes a ticket *before* it is spawned, and gives it
// back when it finishes. The driver waits until no tickets are out.
//
// Registration happens synchronously in the spawning code, never inside the
// spawned task. A download task registers its extract task before its own
// ticket is returned, so the count cannot touch zero while work remains.
//
// Rust concepts:
// - Drop: the ticket deregisters in its destructor, so a task that returns
//   early, panics or is cancelled still gives its ticket back
// - Notify: wakes the waiting driver without a busy loop
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub(crate) struct LevelBarrier {
    pending: AtomicUsize,
    idle: Notify,
}

/// Proof that a task is registered with a LevelBarrier
#[derive(Debug)]
pub(crate) struct Ticket {
    barrier: Arc<LevelBarrier>,
}

impl LevelBarrier {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers one more task; call before handing the task to a pool
    pub(crate) fn register(self: &Arc<Self>) -> Ticket {
        self.pending.fetch_add(1, Ordering::AcqRel);
        Ticket {
            barrier: Arc::clone(self),
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Waits until every registered task has finished
    pub(crate) async fn wait(&self) {
        loop {
            // Enable the waiter before checking the count, otherwise a
            // notification sent between the check and the await is lost
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if self.barrier.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.barrier.idle.notify_waiters();
        }
    }
}
