//! View error types.

use thiserror::Error;

/// Errors that can occur during view processing.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An error occurred reading the status ledger.
    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),

    /// A view-specific error.
    #[error("View error: {0}")]
    View(String),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
