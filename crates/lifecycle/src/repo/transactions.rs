//! Transaction repository trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{Transaction, TransactionId};
use tokio::sync::RwLock;

use crate::error::RepoError;

/// Storage seam for payment transaction rows.
///
/// There is no delete: cancelled and failed transactions stay as the audit
/// trail.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts a new transaction row.
    async fn insert(&self, transaction: Transaction) -> Result<(), RepoError>;

    /// Looks up a transaction by ID.
    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError>;

    /// Replaces a transaction row (status/gateway updates).
    async fn update(&self, transaction: Transaction) -> Result<(), RepoError>;

    /// Returns all transactions for an order, oldest first.
    async fn for_order(&self, order_id: OrderId) -> Result<Vec<Transaction>, RepoError>;
}

/// In-memory transaction repository for tests.
#[derive(Clone, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
}

impl InMemoryTransactionRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored transactions.
    pub async fn transaction_count(&self) -> usize {
        self.transactions.read().await.len()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert(&self, transaction: Transaction) -> Result<(), RepoError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction);
        Ok(())
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        Ok(self.transactions.read().await.get(&id).cloned())
    }

    async fn update(&self, transaction: Transaction) -> Result<(), RepoError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction);
        Ok(())
    }

    async fn for_order(&self, order_id: OrderId) -> Result<Vec<Transaction>, RepoError> {
        let transactions = self.transactions.read().await;
        let mut rows: Vec<_> = transactions
            .values()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.created_at);
        Ok(rows)
    }
}
