use common::OrderId;
use domain::OrderStatus;
use thiserror::Error;

/// Errors that can occur when interacting with the status ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The proposed status is not a legal successor of the order's current
    /// status, or is not a valid opening status for a new ledger.
    #[error(
        "Invalid transition for order {order_id}: {} -> {to}",
        .from.map(|s| s.as_str()).unwrap_or("<none>")
    )]
    InvalidTransition {
        order_id: OrderId,
        from: Option<OrderStatus>,
        to: OrderStatus,
    },

    /// The order has no ledger entries.
    #[error("Order not found in ledger: {0}")]
    OrderNotFound(OrderId),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
