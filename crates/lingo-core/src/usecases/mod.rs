//! Use cases (interactors) for Lingo offline content
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`DownloadContentUseCase`] - Fill the local store ahead of offline use
//! - [`SynchronizeUseCase`] - Push learner data and reconcile `progress`
//! - [`ReportCapacityUseCase`] - Storage consumption snapshots
//! - [`ClearPartitionUseCase`] - Empty a single partition
//!
//! Download, sync and clear share a [`PartitionLocks`] registry so that two
//! of them never touch the same partition at once.

mod feedback;

pub mod clear_partition;
pub mod download_content;
pub mod locks;
pub mod report_capacity;
pub mod synchronize;

#[cfg(test)]
mod testing;

pub use clear_partition::ClearPartitionUseCase;
pub use download_content::{ContentSource, DownloadContentUseCase, DownloadReport, PartitionDownload};
pub use locks::{PartitionGuard, PartitionLocks};
pub use report_capacity::{CapacityReport, ReportCapacityUseCase};
pub use synchronize::{SyncOutcome, SyncSummary, SynchronizeUseCase};
