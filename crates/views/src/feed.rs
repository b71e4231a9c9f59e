//! Ledger feed for delivering status entries to views.

use futures_util::StreamExt;
use ledger::{LedgerStore, StatusEntry};

use crate::Result;
use crate::view::View;

/// Feeds ledger entries to registered views.
///
/// The feed supports:
/// - Catch-up: replays all entries from the ledger to bring views up to date
/// - Single delivery: delivers a fresh entry to all views
/// - Rebuild: resets all views and replays from scratch
pub struct LedgerFeed<L: LedgerStore> {
    ledger: L,
    views: Vec<Box<dyn View>>,
}

impl<L: LedgerStore> LedgerFeed<L> {
    /// Creates a new feed over the given ledger.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            views: Vec::new(),
        }
    }

    /// Registers a view with this feed.
    pub fn register(&mut self, view: Box<dyn View>) {
        self.views.push(view);
    }

    /// Returns the number of registered views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Runs catch-up processing: streams all ledger entries and delivers
    /// them to each view that hasn't already seen them.
    #[tracing::instrument(skip(self))]
    pub async fn run_catch_up(&self) -> Result<()> {
        let mut stream = self.ledger.stream_all().await?;
        let mut entry_index: u64 = 0;

        while let Some(result) = stream.next().await {
            let entry = result?;
            entry_index += 1;

            for view in &self.views {
                let pos = view.position().await;
                if pos.entries_processed < entry_index {
                    view.handle(&entry).await?;
                    metrics::counter!("view_entries_processed").increment(1);
                }
            }
        }

        tracing::info!(entries_processed = entry_index, "catch-up complete");

        Ok(())
    }

    /// Delivers a single entry to all registered views.
    #[tracing::instrument(skip(self, entry), fields(status = %entry.status))]
    pub async fn deliver(&self, entry: &StatusEntry) -> Result<()> {
        for view in &self.views {
            view.handle(entry).await?;
        }
        Ok(())
    }

    /// Resets all views and replays the whole ledger.
    #[tracing::instrument(skip(self))]
    pub async fn rebuild_all(&self) -> Result<()> {
        for view in &self.views {
            view.reset().await?;
        }
        self.run_catch_up().await
    }
}
