//! Order repository trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderNumber, StaffId};
use tokio::sync::RwLock;

use crate::error::RepoError;

/// Storage seam for order rows.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Issues the next human-readable order number.
    async fn next_order_number(&self) -> Result<OrderNumber, RepoError>;

    /// Inserts a new order row.
    async fn insert(&self, order: Order) -> Result<(), RepoError>;

    /// Looks up an order by ID.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, RepoError>;

    /// Records the staff member currently assigned to the order.
    async fn assign_staff(&self, order_id: OrderId, staff: StaffId) -> Result<(), RepoError>;
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    next_number: u32,
}

/// In-memory order repository for tests.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn next_order_number(&self) -> Result<OrderNumber, RepoError> {
        let mut state = self.state.write().await;
        state.next_number += 1;
        Ok(OrderNumber::from_seq(state.next_number))
    }

    async fn insert(&self, order: Order) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.orders.insert(order.id, order);
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, RepoError> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }

    async fn assign_staff(&self, order_id: OrderId, staff: StaffId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if let Some(order) = state.orders.get_mut(&order_id) {
            order.assigned_staff = Some(staff);
        }
        Ok(())
    }
}
