use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{ActorId, OrderStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-order sequence number of a ledger entry.
///
/// Sequences start at 1 for the opening entry and increment by 1. Together
/// with the timestamp they give entries a total order per ledger; the
/// sequence is the exact tiebreaker when two entries share a millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Seq(i64);

impl Seq {
    /// Creates a sequence number from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The sequence of the first entry in a ledger.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next sequence number.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Seq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable row of an order's status history.
///
/// Entries are write-once: the store exposes no update or delete. The
/// current status of an order is by definition the entry with the highest
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub entry_id: EntryId,
    pub order_id: OrderId,
    pub seq: Seq,
    pub status: OrderStatus,

    /// Who caused the transition (customer, staff, or the payment gate).
    pub actor_id: ActorId,

    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
