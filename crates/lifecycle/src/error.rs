//! Lifecycle error types.

use claims::ClaimError;
use common::OrderId;
use domain::{OrderStatus, Role, Stage, TransactionId};
use ledger::LedgerError;
use thiserror::Error;

/// Malformed stage input.
///
/// Validation failures change nothing: no effect is persisted, no status is
/// appended, and a held claim stays held.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The reported shoe count does not match the supplied shoe list.
    #[error("Shoe count mismatch: reported {expected}, listed {actual}")]
    ShoeCountMismatch { expected: u32, actual: usize },

    /// An inspection must describe at least one pair of shoes.
    #[error("Shoe list is empty")]
    EmptyShoeList,

    /// Photo evidence is mandatory for this stage.
    #[error("Photo evidence is required for {stage}")]
    MissingPhotos { stage: Stage },

    /// Every inspected pair needs at least one service.
    #[error("Shoe at position {position} has no services")]
    NoServices { position: u32 },
}

/// Errors surfaced at the orchestrator boundary.
///
/// Everything a caller can get back is one of these typed failures; nothing
/// is retried internally except payment-callback replay, which is tolerated
/// by idempotent status checks rather than surfaced as an error.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A transition was rejected by the status ledger, or the order has no
    /// ledger entries.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A claim operation failed. `AlreadyClaimed` is an expected outcome of
    /// staff racing for the same task; treat it as a normal negative result.
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Repo(#[from] RepoError),

    /// The acting role may not trigger this event, or the actor does not
    /// hold the claim the event requires.
    #[error("Unauthorized: {role} may not {action}")]
    Unauthorized { action: &'static str, role: Role },

    /// Malformed stage input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown order.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Unknown transaction referenced by a gateway callback.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The stage's task is not open while the order is in this status.
    /// The claim-side equivalent of an invalid transition.
    #[error("Stage {stage} of order {order_id} is not claimable in status {status}")]
    StageNotClaimable {
        order_id: OrderId,
        stage: Stage,
        status: OrderStatus,
    },

    /// The gateway reported a status outside the translation table. The
    /// transaction is left untouched.
    #[error("Unknown gateway status: {0}")]
    UnknownGatewayStatus(String),
}

/// Errors from the repository seams the excluded persistence layer plugs
/// into. The in-memory implementations never produce these.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for lifecycle results.
pub type Result<T> = std::result::Result<T, LifecycleError>;
