//! Evidence photos recorded during stage work.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, PhotoId};
use crate::stage::PhotoStage;

/// An evidence photo attached to an order. Immutable after creation.
///
/// The core records only a reference to the stored file; storage mechanics
/// live with the (external) file-storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPhoto {
    pub id: PhotoId,
    pub order_id: OrderId,
    pub stage: PhotoStage,
    pub uploaded_by: ActorId,

    /// Opaque storage key/path understood by the file-storage layer.
    pub file_ref: String,

    pub note: Option<String>,
    pub taken_at: DateTime<Utc>,
}

impl OrderPhoto {
    pub fn new(
        order_id: OrderId,
        stage: PhotoStage,
        uploaded_by: ActorId,
        file_ref: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: PhotoId::new(),
            order_id,
            stage,
            uploaded_by,
            file_ref: file_ref.into(),
            note,
            taken_at: Utc::now(),
        }
    }
}
