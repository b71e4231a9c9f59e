//! Lifecycle orchestration for the shoe-care order system.
//!
//! This crate is the write side of the core: the [`LifecycleOrchestrator`]
//! accepts every lifecycle event (claim, stage completion, cancellation,
//! payment settlement), validates role, status, and claim ownership, and is
//! the only component that appends to the status ledger. The three stage
//! processors hold the stage business rules, and the [`PaymentGate`]
//! isolates gateway vocabulary at the boundary.

pub mod config;
pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod repo;
pub mod stages;

pub use config::Config;
pub use error::{LifecycleError, RepoError, Result, ValidationError};
pub use gate::{GatewayCallback, PaymentGate, Settlement};
pub use orchestrator::LifecycleOrchestrator;
pub use repo::{
    EvidenceRepository, InMemoryEvidenceRepository, InMemoryOrderRepository,
    InMemoryTransactionRepository, OrderRepository, TransactionRepository,
};
pub use stages::{
    DeliveryCompletion, DeliveryProcessor, InspectionProcessor, InspectionReport, PhotoUpload,
    PickupAbandon, PickupCompletion, PickupProcessor, StageOutcome, StageProcessor,
};
