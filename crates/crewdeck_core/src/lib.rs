//! Core domain logic for CrewDeck.
//! This crate is the single source of truth for allocation invariants.

pub mod journal;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;

pub use journal::{
    FileTransactionLog, JournalError, JournalResult, MemoryTransactionLog, TransactionLog,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId};
pub use model::resource::{Resource, ResourceId, ResourceKind, ResourceState};
pub use registry::{Registry, RegistryError, RegistryResult};
pub use service::allocation_service::{AllocationService, MaintainOutcome, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
