//! Order status state machine and track definitions.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Online track:
/// ```text
/// WaitingDeposit ──► PickupScheduled ◄──► PickupProgress ──► Inspection ──► WaitingPayment
///                                                                                │
///      Completed ◄── Delivery ◄── ProcessCompleted ◄── InProcess ◄──────────────┘
/// ```
/// Offline orders enter directly at `Inspection` and follow the same tail.
/// Any non-terminal status may move to `Cancelled`; `Completed` and
/// `Cancelled` are terminal. The only backward edge is
/// `PickupProgress → PickupScheduled`, recorded when a staff member abandons
/// a pickup and the task re-opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting the deposit payment that unlocks pickup scheduling.
    WaitingDeposit,

    /// Deposit settled; the pickup task is open for staff to claim.
    PickupScheduled,

    /// A staff member holds the pickup claim and is collecting the shoes.
    PickupProgress,

    /// Shoes are in-store awaiting (or undergoing) inspection.
    Inspection,

    /// Inspection priced the work; awaiting full payment.
    WaitingPayment,

    /// Payment settled; shoes are being cleaned.
    InProcess,

    /// Cleaning finished; awaiting hand-off to the delivery queue.
    ProcessCompleted,

    /// The delivery task is open for staff to claim.
    Delivery,

    /// Shoes returned to the customer (terminal).
    Completed,

    /// Order was cancelled (terminal).
    Cancelled,
}

/// The ordered sequence of statuses an order type passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// Pickup/delivery orders: full path from deposit through delivery.
    Online,

    /// In-store orders: enter at inspection, skipping the pickup states.
    Offline,
}

impl Track {
    /// Returns the status that opens a ledger on this track.
    pub fn head(&self) -> OrderStatus {
        match self {
            Track::Online => OrderStatus::WaitingDeposit,
            Track::Offline => OrderStatus::Inspection,
        }
    }

    /// Identifies the track a ledger belongs to from its opening status.
    ///
    /// Only a track head may open a ledger; anything else returns `None`.
    pub fn starting_at(status: OrderStatus) -> Option<Track> {
        match status {
            OrderStatus::WaitingDeposit => Some(Track::Online),
            OrderStatus::Inspection => Some(Track::Offline),
            _ => None,
        }
    }

    /// Returns the full status path of this track, in order.
    pub fn path(&self) -> &'static [OrderStatus] {
        match self {
            Track::Online => &[
                OrderStatus::WaitingDeposit,
                OrderStatus::PickupScheduled,
                OrderStatus::PickupProgress,
                OrderStatus::Inspection,
                OrderStatus::WaitingPayment,
                OrderStatus::InProcess,
                OrderStatus::ProcessCompleted,
                OrderStatus::Delivery,
                OrderStatus::Completed,
            ],
            Track::Offline => &[
                OrderStatus::Inspection,
                OrderStatus::WaitingPayment,
                OrderStatus::InProcess,
                OrderStatus::ProcessCompleted,
                OrderStatus::Delivery,
                OrderStatus::Completed,
            ],
        }
    }
}

impl OrderStatus {
    /// Returns the immediate successor of this status on the given track.
    ///
    /// Terminal statuses and statuses not on the track have no successor.
    pub fn successor_in(&self, track: Track) -> Option<OrderStatus> {
        let path = track.path();
        path.iter()
            .position(|s| s == self)
            .and_then(|i| path.get(i + 1))
            .copied()
    }

    /// Returns true if `target` is a legal next status on the given track.
    ///
    /// Legal moves are: the immediate track successor, cancellation from any
    /// non-terminal status, and the pickup abandon edge
    /// (`PickupProgress → PickupScheduled`).
    pub fn can_transition_to(&self, target: OrderStatus, track: Track) -> bool {
        if target == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        if *self == OrderStatus::PickupProgress && target == OrderStatus::PickupScheduled {
            return true;
        }
        self.successor_in(track) == Some(target)
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns true if this status belongs to the pickup leg of the online
    /// track. Offline ledgers never contain these.
    pub fn is_pickup_leg(&self) -> bool {
        matches!(
            self,
            OrderStatus::PickupScheduled | OrderStatus::PickupProgress
        )
    }

    /// Returns the status code as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::WaitingDeposit => "waiting_deposit",
            OrderStatus::PickupScheduled => "pickup_scheduled",
            OrderStatus::PickupProgress => "pickup_progress",
            OrderStatus::Inspection => "inspection",
            OrderStatus::WaitingPayment => "waiting_payment",
            OrderStatus::InProcess => "in_process",
            OrderStatus::ProcessCompleted => "process_completed",
            OrderStatus::Delivery => "delivery",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// All ten statuses, for exhaustive table checks in tests.
    pub fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::WaitingDeposit,
            OrderStatus::PickupScheduled,
            OrderStatus::PickupProgress,
            OrderStatus::Inspection,
            OrderStatus::WaitingPayment,
            OrderStatus::InProcess,
            OrderStatus::ProcessCompleted,
            OrderStatus::Delivery,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Track::Online => write!(f, "online"),
            Track::Offline => write!(f, "offline"),
        }
    }
}

/// Returns true if `statuses` is a valid ledger path for the given track:
/// it must open at the track head and every step must be a legal transition.
pub fn valid_path(track: Track, statuses: &[OrderStatus]) -> bool {
    let Some((first, rest)) = statuses.split_first() else {
        return false;
    };
    if *first != track.head() {
        return false;
    }
    let mut current = *first;
    for status in rest {
        if !current.can_transition_to(*status, track) {
            return false;
        }
        current = *status;
    }
    true
}
