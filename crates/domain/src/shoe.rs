//! Per-shoe service records produced by inspection.

use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A service applied to a single pair of shoes.
///
/// Fixed catalogue; prices are list prices in cents and can be overridden
/// through the lifecycle pricing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    DeepClean,
    Repaint,
    Reglue,
    Unyellowing,
    Whitening,
}

impl Service {
    /// List price of this service.
    pub fn list_price(&self) -> Money {
        let cents = match self {
            Service::DeepClean => 2500,
            Service::Repaint => 6000,
            Service::Reglue => 4500,
            Service::Unyellowing => 3500,
            Service::Whitening => 3000,
        };
        Money::from_cents(cents)
    }

    /// Returns the service code as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::DeepClean => "deep_clean",
            Service::Repaint => "repaint",
            Service::Reglue => "reglue",
            Service::Unyellowing => "unyellowing",
            Service::Whitening => "whitening",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the inspecting staff member recorded for one pair of shoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeSpec {
    /// Free-text description (brand, colour, condition).
    pub description: String,

    /// Services this pair needs; at least one.
    pub services: Vec<Service>,
}

impl ShoeSpec {
    pub fn new(description: impl Into<String>, services: Vec<Service>) -> Self {
        Self {
            description: description.into(),
            services,
        }
    }
}

/// A persisted shoe row, written when inspection completes. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeRecord {
    pub order_id: OrderId,

    /// 1-based position within the order.
    pub position: u32,

    pub description: String,
    pub services: Vec<Service>,

    /// Price of this pair's services at inspection time.
    pub line_price: Money,
}
