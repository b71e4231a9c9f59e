use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{ClaimId, Stage, StaffId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exclusive staff ownership of one processing stage of one order.
///
/// At most one active claim exists per `(order, stage)` pair; the claim is
/// released on stage completion, abandonment, or order cancellation — there
/// is no lease timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub order_id: OrderId,
    pub stage: Stage,
    pub holder: StaffId,
    pub acquired_at: DateTime<Utc>,
}

/// Errors that can occur when interacting with the claim store.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Another staff member already holds the claim for this (order, stage).
    ///
    /// An expected outcome of two staff racing for the same task, not an
    /// exceptional condition.
    #[error("Stage {stage} of order {order_id} is already claimed by staff {holder}")]
    AlreadyClaimed {
        order_id: OrderId,
        stage: Stage,
        holder: StaffId,
    },

    /// No active claim exists for this (order, stage).
    #[error("No active claim for stage {stage} of order {order_id}")]
    NotClaimed { order_id: OrderId, stage: Stage },
}

/// Result type for claim operations.
pub type Result<T> = std::result::Result<T, ClaimError>;

/// Core trait for claim store implementations.
///
/// `acquire` is the one contention point in the system: implementations must
/// make the existence check and the insert atomic (a unique constraint or
/// row lock in a database, a single lock-guarded section in memory) so that
/// of two racing callers exactly one succeeds and the other receives
/// [`ClaimError::AlreadyClaimed`] immediately — never after partial work.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Grants the staff member exclusive ownership of the stage.
    ///
    /// Fails with [`ClaimError::AlreadyClaimed`] if any active claim exists
    /// for the `(order, stage)` pair, including one held by the same staff
    /// member.
    async fn acquire(&self, order_id: OrderId, stage: Stage, staff: StaffId) -> Result<Claim>;

    /// Releases a claim by ID.
    ///
    /// Idempotent: releasing an already-released or unknown claim is a
    /// no-op, because completion and cancellation paths both attempt release
    /// and must tolerate racing each other.
    async fn release(&self, claim_id: ClaimId);

    /// Releases every active claim for an order. Used by cancellation.
    async fn release_for_order(&self, order_id: OrderId);

    /// Returns the active claim for an `(order, stage)` pair, if any.
    async fn active(&self, order_id: OrderId, stage: Stage) -> Option<Claim>;

    /// Returns all active claims.
    async fn active_claims(&self) -> Vec<Claim>;

    /// Returns the active claims held by a staff member.
    async fn claims_for_staff(&self, staff: StaffId) -> Vec<Claim>;
}
