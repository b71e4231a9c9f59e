//! Shared types used across the shoe-care order system.

pub mod types;

pub use types::OrderId;
