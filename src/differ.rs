//! Asynchronous diffing with supersession.
//!
//! Every submission gets a generation number. The diff itself runs on tokio's blocking pool;
//! its result is only delivered if no newer submission has arrived by the time the owner
//! receives it. Each new diff is computed against the last sequence actually delivered, so the
//! scripts a view receives always compose.

use crate::diff::{compute_edit_script, EditScript};
use crate::node::Node;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

struct Computed<T> {
    generation: u64,
    target: Vec<T>,
    script: EditScript<T>,
}

/// Owner-side handle on the diff worker.
pub struct Differ<T> {
    handle: Handle,
    latest: Arc<AtomicU64>,
    delivered_generation: u64,
    delivered: Vec<T>,
    results_tx: mpsc::UnboundedSender<Computed<T>>,
    results_rx: mpsc::UnboundedReceiver<Computed<T>>,
    // Task computing the newest generation, until it has been seen to finish.
    worker: Option<JoinHandle<()>>,
}

impl<T: Node> Differ<T> {
    #[must_use]
    /// Differ that spawns its computations on `handle`, starting from an empty rendered list.
    pub fn new(handle: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            handle,
            latest: Arc::new(AtomicU64::new(0)),
            delivered_generation: 0,
            delivered: Vec::new(),
            results_tx,
            results_rx,
            worker: None,
        }
    }

    /// Schedule a diff from the last delivered sequence to `target`, superseding any pending one.
    ///
    /// Returns the generation assigned to this submission.
    pub fn submit(&mut self, target: Vec<T>) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let base = self.delivered.clone();
        let latest = Arc::clone(&self.latest);
        let results_tx = self.results_tx.clone();
        trace!(generation, len = target.len(), "diff scheduled");

        self.worker = Some(self.handle.spawn_blocking(move || {
            if latest.load(Ordering::Acquire) != generation {
                trace!(generation, "diff superseded before start");
                return;
            }
            let script = compute_edit_script(&base, &target);
            if latest.load(Ordering::Acquire) != generation {
                trace!(generation, "diff superseded while computing");
                return;
            }
            // The receiver only goes away with the differ itself.
            let _ = results_tx.send(Computed {
                generation,
                target,
                script,
            });
        }));
        generation
    }

    #[must_use]
    /// Whether the newest submission still awaits delivery.
    pub fn is_pending(&self) -> bool {
        self.delivered_generation != self.latest.load(Ordering::Acquire)
    }

    #[must_use]
    /// The sequence the view layer currently shows.
    pub fn delivered(&self) -> &[T] {
        &self.delivered
    }

    /// Wait for the script of the newest submission.
    ///
    /// Returns `None` straight away when nothing is pending, and also when the newest
    /// computation ended without a result (it panicked, or the runtime shut down). The
    /// submission then stays pending until the next one supersedes it.
    pub async fn next(&mut self) -> Option<EditScript<T>> {
        while self.is_pending() {
            let Some(worker) = self.worker.as_mut() else {
                // The worker finished; its result, if any, is already queued.
                return self.try_next();
            };
            tokio::select! {
                biased;
                computed = self.results_rx.recv() => {
                    if let Some(script) = self.accept(computed?) {
                        return Some(script);
                    }
                }
                joined = worker => {
                    self.worker = None;
                    if let Err(error) = joined {
                        warn!(%error, "diff worker ended without a result");
                        return None;
                    }
                }
            }
        }
        None
    }

    /// Deliver the newest script if it has already been computed.
    pub fn try_next(&mut self) -> Option<EditScript<T>> {
        while let Ok(computed) = self.results_rx.try_recv() {
            if let Some(script) = self.accept(computed) {
                return Some(script);
            }
        }
        None
    }

    fn accept(&mut self, computed: Computed<T>) -> Option<EditScript<T>> {
        if computed.generation != self.latest.load(Ordering::Acquire) {
            debug!(
                generation = computed.generation,
                "discarding superseded edit script"
            );
            return None;
        }
        self.delivered_generation = computed.generation;
        self.delivered = computed.target;
        debug!(
            generation = computed.generation,
            ops = computed.script.ops().len(),
            "edit script delivered"
        );
        Some(computed.script)
    }
}

#[cfg(test)]
#[path = "tests/differ.rs"]
mod tests;
