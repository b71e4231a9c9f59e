//! Physical-handling stages and their claimable statuses.

use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// A physical-handling phase that requires an exclusive staff claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting the shoes from the customer (online orders only).
    Pickup,

    /// Counting, describing, and pricing the shoes in-store.
    Inspection,

    /// Returning the cleaned shoes to the customer.
    Delivery,
}

impl Stage {
    /// The order status in which this stage's task is open for claiming.
    pub fn claimable_at(&self) -> OrderStatus {
        match self {
            Stage::Pickup => OrderStatus::PickupScheduled,
            Stage::Inspection => OrderStatus::Inspection,
            Stage::Delivery => OrderStatus::Delivery,
        }
    }

    /// The stage whose task is open in the given status, if any.
    pub fn claimable_in(status: OrderStatus) -> Option<Stage> {
        match status {
            OrderStatus::PickupScheduled => Some(Stage::Pickup),
            OrderStatus::Inspection => Some(Stage::Inspection),
            OrderStatus::Delivery => Some(Stage::Delivery),
            _ => None,
        }
    }

    /// Returns the stage code as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pickup => "pickup",
            Stage::Inspection => "inspection",
            Stage::Delivery => "delivery",
        }
    }

    /// All three stages.
    pub fn all() -> &'static [Stage] {
        &[Stage::Pickup, Stage::Inspection, Stage::Delivery]
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stage code an evidence photo is filed under.
///
/// Inspection photos are historically filed under `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoStage {
    Pickup,
    Check,
    Delivery,
}

impl From<Stage> for PhotoStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Pickup => PhotoStage::Pickup,
            Stage::Inspection => PhotoStage::Check,
            Stage::Delivery => PhotoStage::Delivery,
        }
    }
}

impl PhotoStage {
    /// Returns the photo stage code.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoStage::Pickup => "pickup",
            PhotoStage::Check => "check",
            PhotoStage::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for PhotoStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claimable_statuses_roundtrip() {
        for stage in Stage::all() {
            assert_eq!(Stage::claimable_in(stage.claimable_at()), Some(*stage));
        }
    }

    #[test]
    fn non_claimable_statuses() {
        for status in [
            OrderStatus::WaitingDeposit,
            OrderStatus::PickupProgress,
            OrderStatus::WaitingPayment,
            OrderStatus::InProcess,
            OrderStatus::ProcessCompleted,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(Stage::claimable_in(status), None, "{status}");
        }
    }

    #[test]
    fn inspection_photos_file_under_check() {
        assert_eq!(PhotoStage::from(Stage::Inspection), PhotoStage::Check);
        assert_eq!(PhotoStage::Check.to_string(), "check");
        assert_eq!(PhotoStage::from(Stage::Pickup).to_string(), "pickup");
    }
}
