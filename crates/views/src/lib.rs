//! Read models over the status ledger.
//!
//! This crate is the query side the (external) UI and notification layers
//! consume:
//! - [`View`] trait for processing ledger entries into read models
//! - [`LedgerFeed`] for catching views up from the ledger stream
//! - [`OrderHistoryView`] — the per-order status timeline
//! - [`TaskBoardView`] — open stage tasks, claimed vs. available

pub mod error;
pub mod feed;
pub mod view;
pub mod views;

pub use error::{Result, ViewError};
pub use feed::LedgerFeed;
pub use view::{View, ViewPosition};
pub use views::{OrderHistoryView, TaskBoard, TaskBoardView, TimelineStep};
