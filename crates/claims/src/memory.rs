use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;
use domain::{ClaimId, Stage, StaffId};
use tokio::sync::RwLock;

use crate::store::{Claim, ClaimError, ClaimStore, Result};

/// In-memory claim store.
///
/// Claims are keyed by `(order, stage)`; the check-and-insert in `acquire`
/// runs inside one write-lock critical section, standing in for the unique
/// constraint a database-backed implementation relies on.
#[derive(Clone, Default)]
pub struct InMemoryClaimStore {
    claims: Arc<RwLock<HashMap<(OrderId, Stage), Claim>>>,
}

impl InMemoryClaimStore {
    /// Creates a new empty claim store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of active claims.
    pub async fn claim_count(&self) -> usize {
        self.claims.read().await.len()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn acquire(&self, order_id: OrderId, stage: Stage, staff: StaffId) -> Result<Claim> {
        let mut claims = self.claims.write().await;

        if let Some(existing) = claims.get(&(order_id, stage)) {
            metrics::counter!("claims_contended").increment(1);
            tracing::debug!(%order_id, stage = %stage, holder = %existing.holder, "claim contended");
            return Err(ClaimError::AlreadyClaimed {
                order_id,
                stage,
                holder: existing.holder,
            });
        }

        let claim = Claim {
            id: ClaimId::new(),
            order_id,
            stage,
            holder: staff,
            acquired_at: Utc::now(),
        };
        claims.insert((order_id, stage), claim.clone());

        metrics::counter!("claims_acquired").increment(1);
        tracing::debug!(%order_id, stage = %stage, staff = %staff, "claim acquired");

        Ok(claim)
    }

    async fn release(&self, claim_id: ClaimId) {
        let mut claims = self.claims.write().await;
        claims.retain(|_, claim| claim.id != claim_id);
    }

    async fn release_for_order(&self, order_id: OrderId) {
        let mut claims = self.claims.write().await;
        claims.retain(|(id, _), _| *id != order_id);
    }

    async fn active(&self, order_id: OrderId, stage: Stage) -> Option<Claim> {
        self.claims.read().await.get(&(order_id, stage)).cloned()
    }

    async fn active_claims(&self) -> Vec<Claim> {
        self.claims.read().await.values().cloned().collect()
    }

    async fn claims_for_staff(&self, staff: StaffId) -> Vec<Claim> {
        self.claims
            .read()
            .await
            .values()
            .filter(|c| c.holder == staff)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_and_release() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff = StaffId::new();

        let claim = store.acquire(order_id, Stage::Pickup, staff).await.unwrap();
        assert_eq!(claim.order_id, order_id);
        assert_eq!(claim.holder, staff);
        assert_eq!(store.claim_count().await, 1);

        store.release(claim.id).await;
        assert_eq!(store.claim_count().await, 0);
        assert!(store.active(order_id, Stage::Pickup).await.is_none());
    }

    #[tokio::test]
    async fn second_acquire_fails_with_already_claimed() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff_a = StaffId::new();
        let staff_b = StaffId::new();

        store
            .acquire(order_id, Stage::Pickup, staff_a)
            .await
            .unwrap();

        let result = store.acquire(order_id, Stage::Pickup, staff_b).await;
        assert!(matches!(
            result,
            Err(ClaimError::AlreadyClaimed { holder, .. }) if holder == staff_a
        ));
    }

    #[tokio::test]
    async fn same_staff_cannot_double_acquire() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff = StaffId::new();

        store.acquire(order_id, Stage::Pickup, staff).await.unwrap();
        let result = store.acquire(order_id, Stage::Pickup, staff).await;
        assert!(matches!(result, Err(ClaimError::AlreadyClaimed { .. })));
    }

    #[tokio::test]
    async fn different_stages_claim_independently() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff = StaffId::new();

        store.acquire(order_id, Stage::Pickup, staff).await.unwrap();
        store
            .acquire(order_id, Stage::Inspection, staff)
            .await
            .unwrap();

        assert_eq!(store.claim_count().await, 2);
        assert_eq!(store.claims_for_staff(staff).await.len(), 2);
    }

    #[tokio::test]
    async fn release_is_idempotent() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff = StaffId::new();

        let claim = store.acquire(order_id, Stage::Pickup, staff).await.unwrap();
        store.release(claim.id).await;
        // Releasing again, and releasing an unknown claim, are no-ops.
        store.release(claim.id).await;
        store.release(ClaimId::new()).await;
        assert_eq!(store.claim_count().await, 0);
    }

    #[tokio::test]
    async fn release_for_order_clears_all_stages() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let other = OrderId::new();
        let staff = StaffId::new();

        store.acquire(order_id, Stage::Pickup, staff).await.unwrap();
        store
            .acquire(order_id, Stage::Inspection, staff)
            .await
            .unwrap();
        store.acquire(other, Stage::Delivery, staff).await.unwrap();

        store.release_for_order(order_id).await;

        assert_eq!(store.claim_count().await, 1);
        assert!(store.active(other, Stage::Delivery).await.is_some());
    }

    #[tokio::test]
    async fn released_stage_is_reacquirable() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff_a = StaffId::new();
        let staff_b = StaffId::new();

        let claim = store
            .acquire(order_id, Stage::Inspection, staff_a)
            .await
            .unwrap();
        store.release(claim.id).await;

        let reclaimed = store
            .acquire(order_id, Stage::Inspection, staff_b)
            .await
            .unwrap();
        assert_eq!(reclaimed.holder, staff_b);
        assert_ne!(reclaimed.id, claim.id);
    }

    #[tokio::test]
    async fn concurrent_acquire_yields_exactly_one_winner() {
        let store = InMemoryClaimStore::new();
        let order_id = OrderId::new();
        let staff_a = StaffId::new();
        let staff_b = StaffId::new();

        let s1 = store.clone();
        let s2 = store.clone();
        let t1 = tokio::spawn(async move { s1.acquire(order_id, Stage::Pickup, staff_a).await });
        let t2 = tokio::spawn(async move { s2.acquire(order_id, Stage::Pickup, staff_b).await });

        let results = [t1.await.unwrap(), t2.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let losses = results
            .iter()
            .filter(|r| matches!(r, Err(ClaimError::AlreadyClaimed { .. })))
            .count();

        assert_eq!(wins, 1);
        assert_eq!(losses, 1);
        assert_eq!(store.claim_count().await, 1);
    }
}
