//! Inspection stage: counting, describing, and pricing the shoes.

use domain::{Actor, Money, Order, OrderPhoto, OrderStatus, ShoeRecord, ShoeSpec, Stage};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::stages::{PhotoUpload, StageOutcome, StageProcessor};

/// What the inspecting staff member submits on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Count reported at intake; must match the shoe list length.
    pub total_shoes: u32,

    /// One spec per pair.
    pub shoes: Vec<ShoeSpec>,

    /// Condition photos. Mandatory for inspection.
    pub photos: Vec<PhotoUpload>,

    pub note: Option<String>,
}

/// Processor for the inspection stage.
///
/// Completion persists the shoe records with their service pricing from the
/// catalogue; the orchestrator opens the full-payment transaction over the
/// priced total.
#[derive(Debug, Default)]
pub struct InspectionProcessor;

impl InspectionProcessor {
    fn price_of(spec: &ShoeSpec) -> Money {
        spec.services.iter().map(|s| s.list_price()).sum()
    }
}

impl StageProcessor for InspectionProcessor {
    type Input = InspectionReport;

    fn stage(&self) -> Stage {
        Stage::Inspection
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.shoes.is_empty() {
            return Err(ValidationError::EmptyShoeList);
        }
        if input.total_shoes as usize != input.shoes.len() {
            return Err(ValidationError::ShoeCountMismatch {
                expected: input.total_shoes,
                actual: input.shoes.len(),
            });
        }
        if input.photos.is_empty() {
            return Err(ValidationError::MissingPhotos {
                stage: self.stage(),
            });
        }
        for (i, shoe) in input.shoes.iter().enumerate() {
            if shoe.services.is_empty() {
                return Err(ValidationError::NoServices {
                    position: i as u32 + 1,
                });
            }
        }
        Ok(())
    }

    fn apply(&self, order: &Order, actor: &Actor, input: Self::Input) -> StageOutcome {
        let shoes: Vec<ShoeRecord> = input
            .shoes
            .iter()
            .enumerate()
            .map(|(i, spec)| ShoeRecord {
                order_id: order.id,
                position: i as u32 + 1,
                description: spec.description.clone(),
                services: spec.services.clone(),
                line_price: Self::price_of(spec),
            })
            .collect();

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
            next_status: OrderStatus::WaitingPayment,
            photos,
            shoes,
            note: input.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::OrderId;
    use domain::{CustomerId, OrderNumber, PhotoStage, Service, StaffId};

    fn offline_order() -> Order {
        Order::offline(
            OrderId::new(),
            OrderNumber::from_seq(1),
            CustomerId::new(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    fn report(total_shoes: u32, shoes: Vec<ShoeSpec>) -> InspectionReport {
        InspectionReport {
            total_shoes,
            shoes,
            photos: vec![PhotoUpload::new("orders/1/check/01.jpg")],
            note: None,
        }
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let processor = InspectionProcessor;
        let input = report(
            3,
            vec![
                ShoeSpec::new("pair one", vec![Service::DeepClean]),
                ShoeSpec::new("pair two", vec![Service::DeepClean]),
            ],
        );
        assert_eq!(
            processor.validate(&input),
            Err(ValidationError::ShoeCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn empty_shoe_list_is_rejected() {
        let processor = InspectionProcessor;
        assert_eq!(
            processor.validate(&report(0, vec![])),
            Err(ValidationError::EmptyShoeList)
        );
    }

    #[test]
    fn photos_are_mandatory() {
        let processor = InspectionProcessor;
        let mut input = report(1, vec![ShoeSpec::new("pair", vec![Service::DeepClean])]);
        input.photos.clear();
        assert_eq!(
            processor.validate(&input),
            Err(ValidationError::MissingPhotos {
                stage: Stage::Inspection
            })
        );
    }

    #[test]
    fn shoe_without_services_is_rejected() {
        let processor = InspectionProcessor;
        let input = report(
            2,
            vec![
                ShoeSpec::new("pair one", vec![Service::DeepClean]),
                ShoeSpec::new("pair two", vec![]),
            ],
        );
        assert_eq!(
            processor.validate(&input),
            Err(ValidationError::NoServices { position: 2 })
        );
    }

    #[test]
    fn apply_prices_every_pair_from_the_catalogue() {
        let processor = InspectionProcessor;
        let order = offline_order();
        let staff = Actor::staff(StaffId::new());

        let input = report(
            2,
            vec![
                ShoeSpec::new("white AF1", vec![Service::DeepClean, Service::Whitening]),
                ShoeSpec::new("suede loafers", vec![Service::Reglue]),
            ],
        );
        processor.validate(&input).unwrap();
        let outcome = processor.apply(&order, &staff, input);

        assert_eq!(outcome.next_status, OrderStatus::WaitingPayment);
        assert_eq!(outcome.shoes.len(), 2);
        assert_eq!(outcome.shoes[0].position, 1);
        assert_eq!(
            outcome.shoes[0].line_price,
            Service::DeepClean.list_price() + Service::Whitening.list_price()
        );
        assert_eq!(outcome.shoes[1].line_price, Service::Reglue.list_price());

        let total: Money = outcome.shoes.iter().map(|s| s.line_price).sum();
        assert_eq!(
            total,
            Service::DeepClean.list_price()
                + Service::Whitening.list_price()
                + Service::Reglue.list_price()
        );
        assert_eq!(outcome.photos[0].stage, PhotoStage::Check);
    }
}
