//! Task claim management.
//!
//! Grants and releases exclusive staff ownership of an order's physical
//! stages. Acquisition is the system's single mutual-exclusion point: two
//! staff racing for the same task get exactly one success and one
//! [`ClaimError::AlreadyClaimed`], synchronously.

pub mod memory;
pub mod store;

pub use memory::InMemoryClaimStore;
pub use store::{Claim, ClaimError, ClaimStore, Result};
