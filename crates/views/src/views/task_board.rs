//! Task board read model — which stage tasks are open, and who holds what.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use claims::Claim;
use common::OrderId;
use domain::{Stage, StaffId};
use ledger::StatusEntry;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::Result;
use crate::view::{View, ViewPosition};

/// The rendered task list for one stage: orders whose task is open,
/// split by whether a staff member currently holds the claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskBoard {
    /// Open tasks nobody holds; free to claim.
    pub available: Vec<OrderId>,

    /// Open tasks with their current holder.
    pub claimed: Vec<(OrderId, StaffId)>,
}

/// Read model tracking which orders currently sit in a claimable status.
///
/// Fed from status entries alone; claim state is joined in at snapshot time
/// from the claim store, so the board never caches ownership it doesn't own.
#[derive(Clone)]
pub struct TaskBoardView {
    open: Arc<RwLock<HashMap<Stage, HashSet<OrderId>>>>,
    position: Arc<RwLock<ViewPosition>>,
}

impl TaskBoardView {
    /// Creates a new empty task board.
    pub fn new() -> Self {
        Self {
            open: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ViewPosition::zero())),
        }
    }

    /// Returns the orders whose task for `stage` is currently open.
    pub async fn open_tasks(&self, stage: Stage) -> Vec<OrderId> {
        self.open
            .read()
            .await
            .get(&stage)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Renders the board for a stage against the given active claims.
    ///
    /// Callers fetch the claims from the claim store; the partition is
    /// computed here so "claimed" and "available" always add up to the open
    /// set.
    pub async fn snapshot(&self, stage: Stage, active_claims: &[Claim]) -> TaskBoard {
        let holders: HashMap<OrderId, StaffId> = active_claims
            .iter()
            .filter(|c| c.stage == stage)
            .map(|c| (c.order_id, c.holder))
            .collect();

        let mut board = TaskBoard::default();
        for order_id in self.open_tasks(stage).await {
            match holders.get(&order_id) {
                Some(holder) => board.claimed.push((order_id, *holder)),
                None => board.available.push(order_id),
            }
        }
        board
    }
}

impl Default for TaskBoardView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for TaskBoardView {
    fn name(&self) -> &'static str {
        "TaskBoardView"
    }

    async fn handle(&self, entry: &StatusEntry) -> Result<()> {
        let mut open = self.open.write().await;

        // A status change closes whatever task the order had open and, if
        // the new status is claimable, opens that stage's task.
        for set in open.values_mut() {
            set.remove(&entry.order_id);
        }
        if let Some(stage) = Stage::claimable_in(entry.status) {
            open.entry(stage).or_default().insert(entry.order_id);
        }
        drop(open);

        let mut pos = self.position.write().await;
        *pos = pos.advance();
        Ok(())
    }

    async fn position(&self) -> ViewPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.open.write().await.clear();
        *self.position.write().await = ViewPosition::zero();
        Ok(())
    }
}
