//! Data model for the shoe-care order lifecycle.
//!
//! This crate defines the closed vocabulary the rest of the system is built
//! on:
//! - [`OrderStatus`] and [`Track`] — the status state machine and its two
//!   paths (online pickup/delivery vs. offline walk-in)
//! - [`Stage`] — the claim-gated physical phases
//! - [`Role`] / [`Actor`] — who may trigger which lifecycle event
//! - Orders, transactions, shoe records, and evidence photos

pub mod actor;
pub mod ids;
pub mod money;
pub mod order;
pub mod photo;
pub mod shoe;
pub mod stage;
pub mod status;
pub mod transaction;

pub use actor::{Actor, Role};
pub use ids::{ActorId, AddressId, ClaimId, CustomerId, PhotoId, StaffId, TransactionId};
pub use money::Money;
pub use order::{Order, OrderKind, OrderNumber};
pub use photo::OrderPhoto;
pub use shoe::{Service, ShoeRecord, ShoeSpec};
pub use stage::{PhotoStage, Stage};
pub use status::{OrderStatus, Track, valid_path};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
