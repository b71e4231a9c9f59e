//! Authenticated actors and their roles.

use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, CustomerId, StaffId};

/// The role an authenticated actor holds.
///
/// A fixed closed set; authorization in the orchestrator matches on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An end customer; may create online orders and cancel their own.
    Customer,

    /// A staff member; claims and works the physical stages.
    Staff,

    /// Back-office; everything staff can do, plus unrestricted cancel.
    Admin,
}

impl Role {
    /// Returns true for roles allowed to work physical stages.
    pub fn is_operational(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    /// Returns the role code as stored and reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An already-authenticated actor, as handed over by the (external) auth
/// layer. The core never authenticates; it only authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
}

impl Actor {
    /// An actor acting as the given customer.
    pub fn customer(id: CustomerId) -> Self {
        Self {
            id: id.into(),
            role: Role::Customer,
        }
    }

    /// An actor acting as the given staff member.
    pub fn staff(id: StaffId) -> Self {
        Self {
            id: id.into(),
            role: Role::Staff,
        }
    }

    /// An administrative actor.
    pub fn admin(id: ActorId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    /// The staff identity of this actor. Only meaningful for operational
    /// roles; callers check the role first.
    pub fn staff_id(&self) -> StaffId {
        self.id.into()
    }

    /// Returns true if this actor is the given customer.
    pub fn is_customer(&self, customer: CustomerId) -> bool {
        self.role == Role::Customer && self.id == customer.into()
    }
}
