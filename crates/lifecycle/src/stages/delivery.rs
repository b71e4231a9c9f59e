//! Delivery stage: returning the cleaned shoes.

use domain::{Actor, Order, OrderPhoto, OrderStatus, Stage};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::stages::{PhotoUpload, StageOutcome, StageProcessor};

/// Input for completing a delivery: shoes handed back to the customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryCompletion {
    /// Proof-of-delivery photos.
    pub photos: Vec<PhotoUpload>,
    pub note: Option<String>,
}

/// Processor for the delivery stage.
///
/// An abandoned delivery releases the claim and leaves the order in
/// `delivery` awaiting re-claim; it never re-opens earlier stages.
#[derive(Debug, Default)]
pub struct DeliveryProcessor;

impl StageProcessor for DeliveryProcessor {
    type Input = DeliveryCompletion;

    fn stage(&self) -> Stage {
        Stage::Delivery
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
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
            next_status: OrderStatus::Completed,
            photos,
            shoes: Vec::new(),
            note: input.note,
        }
    }
}
