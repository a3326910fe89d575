//! Domain entities and business logic
//!
//! This module contains the core domain types for Lingo:
//! - Partitions of the local store and their identifier fields
//! - Records and validated record identifiers
//! - Sync batches pushed to the remote source
//! - Storage capacity snapshots and byte formatting
//! - Connectivity state
//! - Placeholder content generation
//! - Domain-specific error types

pub mod connectivity;
pub mod errors;
pub mod newtypes;
pub mod partition;
pub mod placeholder;
pub mod record;
pub mod storage_info;
pub mod sync_batch;

// Re-export commonly used types
pub use connectivity::ConnectivityState;
pub use errors::{DomainError, OfflineError};
pub use newtypes::RecordId;
pub use partition::Partition;
pub use record::{Record, SYNTHETIC_FIELD};
pub use storage_info::{format_bytes, QuotaEstimate, StorageInfo};
pub use sync_batch::SyncBatch;
