//! Identifier newtypes for the order domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a customer.
    CustomerId
}

uuid_id! {
    /// Unique identifier for a staff member.
    StaffId
}

uuid_id! {
    /// The identity a lifecycle event is attributed to in the ledger.
    ///
    /// Customers, staff, and the payment gateway all act under an `ActorId`.
    ActorId
}

uuid_id! {
    /// Unique identifier for a payment transaction.
    TransactionId
}

uuid_id! {
    /// Unique identifier for a stage claim.
    ClaimId
}

uuid_id! {
    /// Reference to a customer address held by the (external) address book.
    AddressId
}

uuid_id! {
    /// Unique identifier for an evidence photo.
    PhotoId
}

// Customers and staff act under their own id.
impl From<CustomerId> for ActorId {
    fn from(id: CustomerId) -> Self {
        ActorId::from_uuid(id.as_uuid())
    }
}

impl From<StaffId> for ActorId {
    fn from(id: StaffId) -> Self {
        ActorId::from_uuid(id.as_uuid())
    }
}

impl From<ActorId> for StaffId {
    fn from(id: ActorId) -> Self {
        StaffId::from_uuid(id.as_uuid())
    }
}
