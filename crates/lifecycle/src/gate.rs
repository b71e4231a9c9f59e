//! Transaction/payment gate: the boundary where gateway vocabulary is
//! translated and settlements are detected.

use chrono::Utc;
use domain::{ActorId, Transaction, TransactionId, TransactionKind, TransactionStatus};
use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, Result};

/// Raw callback payload delivered by the payment gateway.
///
/// `gateway_status` is the gateway's own free-form vocabulary; it is mapped
/// to [`TransactionStatus`] here and never stored raw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCallback {
    pub transaction_id: TransactionId,
    pub gateway_status: String,
    pub gateway_reference: Option<String>,
}

impl GatewayCallback {
    pub fn new(transaction_id: TransactionId, gateway_status: impl Into<String>) -> Self {
        Self {
            transaction_id,
            gateway_status: gateway_status.into(),
            gateway_reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.gateway_reference = Some(reference.into());
        self
    }
}

/// A payment reaching terminal `paid` status, by transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// A settled deposit; unlocks pickup scheduling.
    Deposit,

    /// A settled full payment; unlocks processing.
    FullPayment,
}

/// Maps gateway callbacks onto transactions and reports settlements.
///
/// Safe under at-least-once, out-of-order delivery: `paid` is absorbing, and
/// a replayed settlement is reported again so the orchestrator can make its
/// idempotent status check — advancement is always decided against the
/// ledger's current status, never transaction state alone.
#[derive(Debug, Clone)]
pub struct PaymentGate {
    actor: ActorId,
}

impl PaymentGate {
    /// Creates a gate with its own ledger identity.
    pub fn new() -> Self {
        Self {
            actor: ActorId::new(),
        }
    }

    /// The identity settlement-driven ledger entries are attributed to.
    pub fn actor_id(&self) -> ActorId {
        self.actor
    }

    /// Translates the gateway status vocabulary to the internal enum.
    ///
    /// Fails with [`LifecycleError::UnknownGatewayStatus`] for vocabulary
    /// outside the table; gateway-specific strings never leak inward.
    pub fn map_gateway_status(raw: &str) -> Result<TransactionStatus> {
        match raw {
            "settlement" | "capture" | "paid" => Ok(TransactionStatus::Paid),
            "pending" | "authorize" => Ok(TransactionStatus::Pending),
            "partial" | "partial_settlement" => Ok(TransactionStatus::PartiallyPaid),
            "deny" | "failure" | "failed" => Ok(TransactionStatus::Failed),
            "cancel" | "expire" | "expired" => Ok(TransactionStatus::Cancelled),
            other => Err(LifecycleError::UnknownGatewayStatus(other.to_string())),
        }
    }

    /// Applies a callback to a transaction.
    ///
    /// Returns the settlement this callback reports, if any. The transaction
    /// is updated in place; an already-paid transaction is never downgraded
    /// by late or replayed callbacks.
    pub fn apply_callback(
        &self,
        transaction: &mut Transaction,
        callback: &GatewayCallback,
    ) -> Result<Option<Settlement>> {
        let mapped = Self::map_gateway_status(&callback.gateway_status)?;

        if transaction.status != TransactionStatus::Paid {
            transaction.status = mapped;
            transaction.updated_at = Utc::now();
        }
        if let Some(reference) = &callback.gateway_reference {
            transaction.gateway_reference = Some(reference.clone());
        }

        if mapped == TransactionStatus::Paid {
            let settlement = match transaction.kind {
                TransactionKind::Deposit => Settlement::Deposit,
                TransactionKind::FullPayment => Settlement::FullPayment,
            };
            Ok(Some(settlement))
        } else {
            Ok(None)
        }
    }
}

impl Default for PaymentGate {
    fn default() -> Self {
        Self::new()
    }
}
