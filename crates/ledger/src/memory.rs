use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;
use domain::{ActorId, OrderStatus, Track};
use tokio::sync::RwLock;

use crate::{
    EntryId, LedgerError, LedgerQuery, Result, Seq, StatusEntry,
    store::{EntryStream, LedgerStore},
};

/// In-memory status ledger.
///
/// Stores entries in insertion order and provides the same interface a
/// database-backed implementation would. The transition check and the insert
/// happen inside a single write-lock critical section, which is what makes
/// "last committed entry wins" exact: a caller that lost a race fails the
/// transition check against the freshly committed status instead of
/// double-appending.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    entries: Arc<RwLock<Vec<StatusEntry>>>,
}

impl InMemoryLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Clears all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    fn latest_for<'a>(entries: &'a [StatusEntry], order_id: OrderId) -> Option<&'a StatusEntry> {
        entries
            .iter()
            .filter(|e| e.order_id == order_id)
            .max_by_key(|e| e.seq)
    }

    fn track_of(entries: &[StatusEntry], order_id: OrderId) -> Option<Track> {
        entries
            .iter()
            .find(|e| e.order_id == order_id)
            .and_then(|first| Track::starting_at(first.status))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn append(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        actor_id: ActorId,
        note: Option<String>,
    ) -> Result<StatusEntry> {
        let mut entries = self.entries.write().await;

        let seq = match Self::latest_for(&entries, order_id) {
            None => {
                // Opening entry: must be a track head.
                if Track::starting_at(status).is_none() {
                    return Err(LedgerError::InvalidTransition {
                        order_id,
                        from: None,
                        to: status,
                    });
                }
                Seq::first()
            }
            Some(current) => {
                // The track is fixed by the opening entry; latest_for saw at
                // least one entry, so track_of cannot miss.
                let track = Self::track_of(&entries, order_id).ok_or(
                    LedgerError::InvalidTransition {
                        order_id,
                        from: Some(current.status),
                        to: status,
                    },
                )?;
                if !current.status.can_transition_to(status, track) {
                    return Err(LedgerError::InvalidTransition {
                        order_id,
                        from: Some(current.status),
                        to: status,
                    });
                }
                current.seq.next()
            }
        };

        let entry = StatusEntry {
            entry_id: EntryId::new(),
            order_id,
            seq,
            status,
            actor_id,
            note,
            recorded_at: Utc::now(),
        };
        entries.push(entry.clone());

        metrics::counter!("ledger_entries_appended").increment(1);
        tracing::debug!(%order_id, status = %status, seq = %entry.seq, "status appended");

        Ok(entry)
    }

    async fn current_status(&self, order_id: OrderId) -> Result<OrderStatus> {
        let entries = self.entries.read().await;
        Self::latest_for(&entries, order_id)
            .map(|e| e.status)
            .ok_or(LedgerError::OrderNotFound(order_id))
    }

    async fn history(&self, order_id: OrderId) -> Result<Vec<StatusEntry>> {
        let entries = self.entries.read().await;
        let mut history: Vec<_> = entries
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect();
        history.sort_by_key(|e| e.seq);
        Ok(history)
    }

    async fn track(&self, order_id: OrderId) -> Result<Track> {
        let entries = self.entries.read().await;
        Self::track_of(&entries, order_id).ok_or(LedgerError::OrderNotFound(order_id))
    }

    async fn query(&self, query: LedgerQuery) -> Result<Vec<StatusEntry>> {
        let entries = self.entries.read().await;
        let mut matched: Vec<_> = entries
            .iter()
            .filter(|e| {
                if let Some(id) = query.order_id
                    && e.order_id != id
                {
                    return false;
                }
                if let Some(ref statuses) = query.statuses
                    && !statuses.contains(&e.status)
                {
                    return false;
                }
                if let Some(actor) = query.actor_id
                    && e.actor_id != actor
                {
                    return false;
                }
                if let Some(from) = query.from_timestamp
                    && e.recorded_at < from
                {
                    return false;
                }
                if let Some(to) = query.to_timestamp
                    && e.recorded_at > to
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            a.recorded_at
                .cmp(&b.recorded_at)
                .then(a.seq.cmp(&b.seq))
        });

        let offset = query.offset.unwrap_or(0);
        let matched: Vec<_> = matched.into_iter().skip(offset).collect();

        let matched = if let Some(limit) = query.limit {
            matched.into_iter().take(limit).collect()
        } else {
            matched
        };

        Ok(matched)
    }

    async fn stream_all(&self) -> Result<EntryStream> {
        use futures_util::stream;

        let entries = self.entries.read().await;
        let all = entries.clone();

        let stream = stream::iter(all.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }
}
