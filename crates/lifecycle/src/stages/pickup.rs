//! Pickup stage: collecting the shoes from the customer.

use domain::{Actor, Order, OrderPhoto, OrderStatus, Stage};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::stages::{PhotoUpload, StageOutcome, StageProcessor};

/// Input for completing a pickup: the shoes are in hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupCompletion {
    /// Condition photos taken at the door.
    pub photos: Vec<PhotoUpload>,
    pub note: Option<String>,
}

/// Input for abandoning a held pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupAbandon {
    /// False re-opens the task (`pickup_scheduled`); true cancels the order
    /// outright (customer unreachable, wrong address beyond fixing).
    pub non_recoverable: bool,
    pub note: Option<String>,
}

impl PickupAbandon {
    /// A recoverable abandon: the task re-opens for any staff member.
    pub fn recoverable(note: impl Into<String>) -> Self {
        Self {
            non_recoverable: false,
            note: Some(note.into()),
        }
    }

    /// A non-recoverable abandon: the order is cancelled.
    pub fn non_recoverable(note: impl Into<String>) -> Self {
        Self {
            non_recoverable: true,
            note: Some(note.into()),
        }
    }
}

/// Processor for the pickup stage.
#[derive(Debug, Default)]
pub struct PickupProcessor;

impl StageProcessor for PickupProcessor {
    type Input = PickupCompletion;

    fn stage(&self) -> Stage {
        Stage::Pickup
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
        // Pickup photos are recorded but not mandated.
        Ok(())
    }

    fn apply(&self, order: &Order, actor: &Actor, input: Self::Input) -> StageOutcome {
        let photos = input
            .photos
            .into_iter()
            .map(|p| {
                OrderPhoto::new(
                    order.id,
                    self.stage().into(),
                    actor.id,
                    p.file_ref,
                    p.note,
                )
            })
            .collect();

        StageOutcome {
            next_status: OrderStatus::Inspection,
            photos,
            shoes: Vec::new(),
            note: input.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::OrderId;
    use domain::{AddressId, CustomerId, OrderNumber, PhotoStage, StaffId};

    fn online_order() -> Order {
        Order::online(
            OrderId::new(),
            OrderNumber::from_seq(1),
            CustomerId::new(),
            AddressId::new(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn completion_advances_to_inspection() {
        let processor = PickupProcessor;
        let order = online_order();
        let staff = Actor::staff(StaffId::new());

        let input = PickupCompletion {
            photos: vec![PhotoUpload::new("orders/1/pickup/01.jpg")],
            note: Some("both pairs collected".to_string()),
        };
        processor.validate(&input).unwrap();
        let outcome = processor.apply(&order, &staff, input);

        assert_eq!(outcome.next_status, OrderStatus::Inspection);
        assert_eq!(outcome.photos.len(), 1);
        assert_eq!(outcome.photos[0].stage, PhotoStage::Pickup);
        assert_eq!(outcome.photos[0].uploaded_by, staff.id);
        assert!(outcome.shoes.is_empty());
    }

    #[test]
    fn completion_without_photos_is_accepted() {
        let processor = PickupProcessor;
        assert!(processor.validate(&PickupCompletion::default()).is_ok());
    }
}
