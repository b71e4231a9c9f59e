//! Stage processors for the three claim-gated physical phases.
//!
//! Each processor implements the same capability pair: `validate` checks the
//! submitted input without touching anything, `apply` turns a validated
//! input into a [`StageOutcome`] — the durable effects plus the status the
//! order moves to. Processors are pure; the orchestrator persists the
//! outcome and appends the status, and only ever invokes a processor while
//! the caller holds the stage claim.

pub mod delivery;
pub mod inspection;
pub mod pickup;

pub use delivery::{DeliveryCompletion, DeliveryProcessor};
pub use inspection::{InspectionProcessor, InspectionReport};
pub use pickup::{PickupAbandon, PickupCompletion, PickupProcessor};

use domain::{Actor, Order, OrderPhoto, OrderStatus, ShoeRecord, Stage};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A photo submitted with stage input: the storage reference plus an
/// optional caption. The file itself lives with the external storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub file_ref: String,
    pub note: Option<String>,
}

impl PhotoUpload {
    pub fn new(file_ref: impl Into<String>) -> Self {
        Self {
            file_ref: file_ref.into(),
            note: None,
        }
    }

    pub fn with_note(file_ref: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            file_ref: file_ref.into(),
            note: Some(note.into()),
        }
    }
}

/// The durable effects of completing a stage.
#[derive(Debug)]
pub struct StageOutcome {
    /// Status the order advances to when the outcome commits.
    pub next_status: OrderStatus,

    /// Evidence photos to record.
    pub photos: Vec<OrderPhoto>,

    /// Shoe records to persist (inspection only). Line prices carry the
    /// computed service pricing the payment transaction is opened from.
    pub shoes: Vec<ShoeRecord>,

    /// Note for the ledger entry.
    pub note: Option<String>,
}

/// Capability set shared by the three stage processors.
pub trait StageProcessor {
    /// The stage-specific completion input.
    type Input;

    /// The stage this processor handles.
    fn stage(&self) -> Stage;

    /// Checks the input without side effects.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Turns a validated input into the stage's durable effects.
    ///
    /// Callers validate first; `apply` does not re-check.
    fn apply(&self, order: &Order, actor: &Actor, input: Self::Input) -> StageOutcome;
}
