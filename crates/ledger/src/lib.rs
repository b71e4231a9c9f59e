//! Append-only order status ledger.
//!
//! Every accepted lifecycle transition becomes one immutable [`StatusEntry`];
//! the current status of an order is its latest entry. The ledger enforces
//! the status transition table at append time, inside the store's atomic
//! section, so committed histories are valid paths by construction.

pub mod entry;
pub mod error;
pub mod memory;
pub mod query;
pub mod store;

pub use entry::{EntryId, Seq, StatusEntry};
pub use error::{LedgerError, Result};
pub use memory::InMemoryLedger;
pub use query::LedgerQuery;
pub use store::{EntryStream, LedgerStore, LedgerStoreExt};
