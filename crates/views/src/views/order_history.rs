//! Order history read model — the status timeline per order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{ActorId, OrderStatus};
use ledger::StatusEntry;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::Result;
use crate::view::{View, ViewPosition};

/// One step in an order's timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub actor_id: ActorId,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// Read model holding the full status timeline of every order.
///
/// This is what the notification/UI collaborators render as "where is my
/// order": each accepted transition, in order, with actor and note.
#[derive(Clone)]
pub struct OrderHistoryView {
    timelines: Arc<RwLock<HashMap<OrderId, Vec<TimelineStep>>>>,
    position: Arc<RwLock<ViewPosition>>,
}

impl OrderHistoryView {
    /// Creates a new empty history view.
    pub fn new() -> Self {
        Self {
            timelines: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ViewPosition::zero())),
        }
    }

    /// Returns the timeline for an order, oldest step first.
    pub async fn timeline(&self, order_id: OrderId) -> Vec<TimelineStep> {
        self.timelines
            .read()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the latest known status of an order.
    pub async fn latest_status(&self, order_id: OrderId) -> Option<OrderStatus> {
        self.timelines
            .read()
            .await
            .get(&order_id)
            .and_then(|steps| steps.last())
            .map(|step| step.status)
    }

    /// Returns the number of orders with a timeline.
    pub async fn order_count(&self) -> usize {
        self.timelines.read().await.len()
    }
}

impl Default for OrderHistoryView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for OrderHistoryView {
    fn name(&self) -> &'static str {
        "OrderHistoryView"
    }

    async fn handle(&self, entry: &StatusEntry) -> Result<()> {
        let mut timelines = self.timelines.write().await;
        timelines.entry(entry.order_id).or_default().push(TimelineStep {
            status: entry.status,
            actor_id: entry.actor_id,
            note: entry.note.clone(),
            at: entry.recorded_at,
        });
        drop(timelines);

        let mut pos = self.position.write().await;
        *pos = pos.advance();
        Ok(())
    }

    async fn position(&self) -> ViewPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.timelines.write().await.clear();
        *self.position.write().await = ViewPosition::zero();
        Ok(())
    }
}
