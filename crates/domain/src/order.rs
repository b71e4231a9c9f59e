//! Order records.

use chrono::{DateTime, NaiveDate, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::ids::{AddressId, CustomerId, StaffId};
use crate::status::Track;

/// How an order entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Created by the customer; shoes are picked up and delivered.
    Online,

    /// Created by staff at the counter; shoes are already in-store.
    Offline,
}

impl OrderKind {
    /// The status track orders of this kind follow.
    pub fn track(&self) -> Track {
        match self {
            OrderKind::Online => Track::Online,
            OrderKind::Offline => Track::Offline,
        }
    }
}

/// Human-readable order number, e.g. `ORD-00042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Formats an order number from a sequence value.
    pub fn from_seq(seq: u32) -> Self {
        Self(format!("ORD-{seq:05}"))
    }

    /// Returns the order number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order row.
///
/// Mutated only through the lifecycle orchestrator; never deleted. The
/// current status lives in the ledger, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: OrderNumber,
    pub kind: OrderKind,
    pub customer_id: CustomerId,

    /// Staff member assigned to the order, set as stages are claimed.
    pub assigned_staff: Option<StaffId>,

    /// Pickup/delivery address; online orders only.
    pub address_id: Option<AddressId>,

    pub scheduled_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an online order; an address is required.
    pub fn online(
        id: OrderId,
        number: OrderNumber,
        customer_id: CustomerId,
        address_id: AddressId,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            number,
            kind: OrderKind::Online,
            customer_id,
            assigned_staff: None,
            address_id: Some(address_id),
            scheduled_date,
            created_at: Utc::now(),
        }
    }

    /// Creates an offline (walk-in) order; no address is kept.
    pub fn offline(
        id: OrderId,
        number: OrderNumber,
        customer_id: CustomerId,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            number,
            kind: OrderKind::Offline,
            customer_id,
            assigned_staff: None,
            address_id: None,
            scheduled_date,
            created_at: Utc::now(),
        }
    }

    /// The status track this order follows.
    pub fn track(&self) -> Track {
        self.kind.track()
    }
}
