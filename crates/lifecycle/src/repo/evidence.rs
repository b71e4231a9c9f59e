//! Evidence repository (photos and shoe records) with in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{OrderPhoto, ShoeRecord};
use tokio::sync::RwLock;

use crate::error::RepoError;

/// Storage seam for stage evidence: photos and the shoe records produced by
/// inspection. Both are write-once.
#[async_trait]
pub trait EvidenceRepository: Send + Sync {
    /// Stores a batch of evidence photos.
    async fn add_photos(&self, photos: Vec<OrderPhoto>) -> Result<(), RepoError>;

    /// Stores the shoe records of a completed inspection.
    async fn add_shoes(&self, shoes: Vec<ShoeRecord>) -> Result<(), RepoError>;

    /// Returns all photos for an order.
    async fn photos_for(&self, order_id: OrderId) -> Result<Vec<OrderPhoto>, RepoError>;

    /// Returns all shoe records for an order, in position order.
    async fn shoes_for(&self, order_id: OrderId) -> Result<Vec<ShoeRecord>, RepoError>;
}

#[derive(Debug, Default)]
struct InMemoryEvidenceState {
    photos: Vec<OrderPhoto>,
    shoes: Vec<ShoeRecord>,
}

/// In-memory evidence repository for tests.
#[derive(Clone, Default)]
pub struct InMemoryEvidenceRepository {
    state: Arc<RwLock<InMemoryEvidenceState>>,
}

impl InMemoryEvidenceRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored photos.
    pub async fn photo_count(&self) -> usize {
        self.state.read().await.photos.len()
    }
}

#[async_trait]
impl EvidenceRepository for InMemoryEvidenceRepository {
    async fn add_photos(&self, photos: Vec<OrderPhoto>) -> Result<(), RepoError> {
        self.state.write().await.photos.extend(photos);
        Ok(())
    }

    async fn add_shoes(&self, shoes: Vec<ShoeRecord>) -> Result<(), RepoError> {
        self.state.write().await.shoes.extend(shoes);
        Ok(())
    }

    async fn photos_for(&self, order_id: OrderId) -> Result<Vec<OrderPhoto>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .photos
            .iter()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn shoes_for(&self, order_id: OrderId) -> Result<Vec<ShoeRecord>, RepoError> {
        let state = self.state.read().await;
        let mut shoes: Vec<_> = state
            .shoes
            .iter()
            .filter(|s| s.order_id == order_id)
            .cloned()
            .collect();
        shoes.sort_by_key(|s| s.position);
        Ok(shoes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ActorId, Money, PhotoStage, Service};

    #[tokio::test]
    async fn photos_filter_by_order() {
        let repo = InMemoryEvidenceRepository::new();
        let order_id = OrderId::new();
        let actor = ActorId::new();

        repo.add_photos(vec![
            OrderPhoto::new(order_id, PhotoStage::Pickup, actor, "a.jpg", None),
            OrderPhoto::new(OrderId::new(), PhotoStage::Pickup, actor, "b.jpg", None),
        ])
        .await
        .unwrap();

        assert_eq!(repo.photo_count().await, 2);
        assert_eq!(repo.photos_for(order_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn shoes_come_back_in_position_order() {
        let repo = InMemoryEvidenceRepository::new();
        let order_id = OrderId::new();

        let shoe = |position| ShoeRecord {
            order_id,
            position,
            description: format!("pair {position}"),
            services: vec![Service::DeepClean],
            line_price: Money::from_cents(2500),
        };
        repo.add_shoes(vec![shoe(2), shoe(1)]).await.unwrap();

        let shoes = repo.shoes_for(order_id).await.unwrap();
        assert_eq!(shoes.len(), 2);
        assert_eq!(shoes[0].position, 1);
        assert_eq!(shoes[1].position, 2);
    }
}
