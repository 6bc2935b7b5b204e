//! Single-slot timer debouncer.
//!
//! At most one pending callback exists at a time; scheduling replaces the
//! previous one instead of stacking, so only the last value inside the quiet
//! window runs. Cancellation only reaches callbacks still waiting out their
//! quiet window: once a callback has started it detaches from the slot and
//! runs to completion (the caller handles discarding a late result).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

struct Pending {
    id: u64,
    handle: Option<JoinHandle<()>>,
}

pub struct Debouncer {
    wait: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: Arc::new(Mutex::new(Pending { id: 0, handle: None })) }
    }

    /// Schedule `task` to run after the quiet window, cancelling any task
    /// still waiting out its window. Must be called inside a tokio runtime.
    pub fn schedule<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let mut pending = self.pending.lock();
        pending.id += 1;
        let id = pending.id;
        if let Some(previous) = pending.handle.take() {
            previous.abort();
        }

        let wait = self.wait;
        let slot = self.pending.clone();
        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            {
                let mut pending = slot.lock();
                if pending.id != id {
                    // replaced while waking up; the newer schedule wins
                    return;
                }
                pending.handle = None;
            }
            task().await;
        }));
    }

    /// Drop the pending task, if any, without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock();
        pending.id += 1;
        if let Some(previous) = pending.handle.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
