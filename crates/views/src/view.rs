//! Core view trait and position tracking.

use async_trait::async_trait;
use ledger::StatusEntry;

use crate::Result;

/// Tracks how many ledger entries a view has processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewPosition {
    /// Number of entries processed by this view.
    pub entries_processed: u64,
}

impl ViewPosition {
    /// Creates a new position at zero.
    pub fn zero() -> Self {
        Self {
            entries_processed: 0,
        }
    }

    /// Advances the position by one entry.
    pub fn advance(&self) -> Self {
        Self {
            entries_processed: self.entries_processed + 1,
        }
    }
}

impl std::fmt::Display for ViewPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position({})", self.entries_processed)
    }
}

/// A read model fed from the status ledger.
///
/// Views are disposable: the ledger remains the single source of truth and
/// any view can be rebuilt from it at any time.
#[async_trait]
pub trait View: Send + Sync {
    /// Returns the name of this view.
    fn name(&self) -> &'static str;

    /// Handles a single ledger entry, updating the view's state.
    async fn handle(&self, entry: &StatusEntry) -> Result<()>;

    /// Returns the current position of this view.
    async fn position(&self) -> ViewPosition;

    /// Resets the view to its initial state.
    async fn reset(&self) -> Result<()>;
}
