use crate::apply::apply;
use crate::event::FeedEvent;
use crate::feed::FeedClient;
use crate::snapshot::manager::SnapshotManager;
use crate::store::ZooStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

/// Counters from one reconciliation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Events decoded from the feed batch
    pub fetched: usize,
    /// Events that changed entity state
    pub applied: usize,
    /// Expected no-ops: duplicates, unknown animals, stale timestamps
    pub skipped: usize,
    /// Events dropped by field validation
    pub invalid: usize,
}

/// Feed reconciler: fetch a batch, order it, merge it into the store.
///
/// Passes are idempotent: the feed grows and overlaps between fetches, and
/// the applier's insert-if-absent and monotonic-timestamp rules make
/// re-applying already-merged events harmless. That is what makes periodic
/// re-fetching safe.
pub struct Reconciler {
    store: Arc<ZooStore>,
    feed: FeedClient,
    snapshots: SnapshotManager,
    poll_interval_seconds: u64,

    /// In-flight pass guard: a trigger that fires while a pass is still
    /// running is dropped rather than queued
    pass_guard: Mutex<()>,
}

impl Reconciler {
    /// Create a reconciler over the given store and feed
    pub fn new(
        store: Arc<ZooStore>,
        feed: FeedClient,
        snapshots: SnapshotManager,
        poll_interval_seconds: u64,
    ) -> Self {
        Self {
            store,
            feed,
            snapshots,
            poll_interval_seconds,
            pass_guard: Mutex::new(()),
        }
    }

    /// Run one fetch-sort-apply cycle.
    ///
    /// A pass that cannot fetch the feed applies nothing and returns the
    /// error; the next scheduled pass retries. A snapshot write failure also
    /// fails the pass, since merged state stays in memory and the next pass
    /// re-persists it. If another pass is still in flight, this trigger is
    /// redundant and returns an empty summary.
    pub async fn run_reconciliation_pass(&self) -> Result<PassSummary> {
        let Ok(_guard) = self.pass_guard.try_lock() else {
            debug!("Reconciliation pass already in flight, dropping trigger");
            return Ok(PassSummary::default());
        };

        let events = self.feed.fetch_events().await?;
        let summary = self.reconcile_batch(events);

        if self.snapshots.enabled() {
            self.snapshots
                .save()
                .context("Failed to persist state after pass")?;
        }

        Ok(summary)
    }

    /// Sort a batch into canonical order and apply it event by event.
    ///
    /// The sort is stable and ascending by event time, so feed entries with
    /// equal timestamps keep their original feed order and the transition is
    /// deterministic for a given batch.
    pub fn reconcile_batch(&self, mut events: Vec<FeedEvent>) -> PassSummary {
        events.sort_by_key(FeedEvent::time);

        let mut summary = PassSummary {
            fetched: events.len(),
            ..PassSummary::default()
        };

        for event in &events {
            if let Err(e) = event.validate() {
                warn!(kind = event.kind(), error = %e, "Dropping invalid event");
                summary.invalid += 1;
                continue;
            }

            let outcome = apply(&self.store, event);
            if outcome.applied() {
                summary.applied += 1;
            } else {
                debug!(kind = event.kind(), outcome = ?outcome, "Event was a no-op");
                summary.skipped += 1;
            }
        }

        summary
    }

    /// Run the periodic reconciliation loop.
    ///
    /// One pass fires immediately at startup, then one per poll interval.
    /// Pass failures are logged and the loop keeps going; the feed being
    /// down must never take the grid down with it.
    pub async fn run_poll_loop(&self) -> Result<()> {
        info!(
            poll_interval_seconds = self.poll_interval_seconds,
            "Starting feed reconciler"
        );

        let mut timer = interval(Duration::from_secs(self.poll_interval_seconds));

        loop {
            // First tick completes immediately
            timer.tick().await;

            match self.run_reconciliation_pass().await {
                Ok(summary) => {
                    info!(
                        fetched = summary.fetched,
                        applied = summary.applied,
                        skipped = summary.skipped,
                        invalid = summary.invalid,
                        animals = self.store.animal_count(),
                        "Reconciliation pass complete"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Reconciliation pass failed");
                }
            }
        }
    }
}
