//! Payment transaction records.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::ids::TransactionId;
use crate::money::Money;

/// What the transaction pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// The up-front deposit gating pickup scheduling.
    Deposit,

    /// The full service payment gating processing.
    FullPayment,
}

/// Internal payment status. Gateway vocabulary is translated to this enum at
/// the gate boundary and never stored raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Cancelled,
    Failed,
}

impl TransactionStatus {
    /// Returns true for statuses that admit a further gateway update.
    ///
    /// `Paid` is terminal for settlement purposes; replayed callbacks on a
    /// paid transaction are tolerated but change nothing.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Pending | TransactionStatus::PartiallyPaid
        )
    }

    /// Returns the status code as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::PartiallyPaid => "partially_paid",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment transaction tied to an order.
///
/// Created when a payment is required, mutated by gateway callbacks, never
/// deleted — cancelled and failed rows stay as the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub order_id: OrderId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub status: TransactionStatus,

    /// Opaque reference assigned by the payment gateway.
    pub gateway_reference: Option<String>,

    /// Payment link expiry, if the gateway issued one.
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new pending transaction.
    pub fn pending(order_id: OrderId, kind: TransactionKind, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            order_id,
            kind,
            amount,
            status: TransactionStatus::Pending,
            gateway_reference: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true once the transaction has fully settled.
    pub fn is_settled(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}
