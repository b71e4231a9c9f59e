use std::pin::Pin;

use async_trait::async_trait;
use common::OrderId;
use domain::{ActorId, OrderStatus, Track};
use futures_core::Stream;

use crate::{LedgerQuery, Result, StatusEntry};

/// A stream of ledger entries, in global insertion order.
pub type EntryStream = Pin<Box<dyn Stream<Item = Result<StatusEntry>> + Send>>;

/// Core trait for status ledger implementations.
///
/// The ledger is the single source of truth for order status: the current
/// status of an order is defined as its latest entry, never a denormalized
/// column. Entries are write-once; no update or delete API exists.
///
/// All implementations must be thread-safe (Send + Sync), and `append` must
/// validate-and-insert atomically so that under concurrent appends the last
/// committed entry wins and every committed path stays consistent with the
/// transition table.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends a status entry for an order.
    ///
    /// The first entry for an order must be a track head (`waiting_deposit`
    /// opens an online ledger, `inspection` an offline one); every later
    /// entry must be a legal transition from the current status on that
    /// track. Fails with [`LedgerError::InvalidTransition`] otherwise.
    ///
    /// Returns the committed entry.
    ///
    /// [`LedgerError::InvalidTransition`]: crate::LedgerError::InvalidTransition
    async fn append(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        actor_id: ActorId,
        note: Option<String>,
    ) -> Result<StatusEntry>;

    /// Reads the current status of an order (its latest entry).
    ///
    /// Fails with [`LedgerError::OrderNotFound`] if the order has no entries.
    ///
    /// [`LedgerError::OrderNotFound`]: crate::LedgerError::OrderNotFound
    async fn current_status(&self, order_id: OrderId) -> Result<OrderStatus>;

    /// Returns an order's full status history in sequence order.
    ///
    /// Returns an empty vector for an unknown order.
    async fn history(&self, order_id: OrderId) -> Result<Vec<StatusEntry>>;

    /// Returns the track an order's ledger follows, fixed by its opening
    /// entry. Fails with `OrderNotFound` if the order has no entries.
    async fn track(&self, order_id: OrderId) -> Result<Track>;

    /// Retrieves entries matching a query.
    async fn query(&self, query: LedgerQuery) -> Result<Vec<StatusEntry>>;

    /// Streams every entry in the ledger, in insertion order.
    ///
    /// This is the feed the read-model views catch up from.
    async fn stream_all(&self) -> Result<EntryStream>;
}

/// Extension trait providing convenience methods for ledger stores.
#[async_trait]
pub trait LedgerStoreExt: LedgerStore {
    /// Returns true if the order has at least one ledger entry.
    async fn has_order(&self, order_id: OrderId) -> Result<bool> {
        Ok(!self.history(order_id).await?.is_empty())
    }

    /// Returns the IDs of orders whose current status equals `status`.
    async fn orders_in_status(&self, status: OrderStatus) -> Result<Vec<OrderId>> {
        let entries = self.query(LedgerQuery::new()).await?;
        let mut latest: std::collections::HashMap<OrderId, &StatusEntry> =
            std::collections::HashMap::new();
        for entry in &entries {
            match latest.get(&entry.order_id) {
                Some(existing) if existing.seq >= entry.seq => {}
                _ => {
                    latest.insert(entry.order_id, entry);
                }
            }
        }
        Ok(latest
            .into_values()
            .filter(|e| e.status == status)
            .map(|e| e.order_id)
            .collect())
    }
}

// Blanket implementation for all LedgerStore implementations
impl<T: LedgerStore + ?Sized> LedgerStoreExt for T {}
