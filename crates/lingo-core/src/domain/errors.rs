//! Domain error types
//!
//! [`DomainError`] covers validation failures on domain values (partition
//! names, record identifiers). [`OfflineError`] is the taxonomy surfaced by
//! the use cases: every variant is recoverable, none is fatal to the
//! application.

use thiserror::Error;

use super::partition::Partition;

/// Errors that can occur while validating domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown partition name
    #[error("Invalid partition: {0}")]
    InvalidPartition(String),

    /// A record is not a JSON object
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record has no usable identifier field
    #[error("Record in '{partition}' is missing its '{field}' identifier")]
    MissingIdentifier {
        /// Partition the record was destined for
        partition: Partition,
        /// Name of the identifier field (`id` or `key`)
        field: &'static str,
    },

    /// Identifier parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

/// Errors reported by the offline cache use cases
///
/// Remote failures are split in two: `RemoteFetchFailed` when the call could
/// not complete at the transport level, `RemoteAckMissing` when the remote
/// answered but reported a logical failure. Callers treat both the same way.
#[derive(Debug, Error)]
pub enum OfflineError {
    /// The persistence backend cannot be opened
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A write was rejected (quota exceeded or backend error)
    #[error("Failed to write to '{partition}': {reason}")]
    StorageWriteFailed {
        /// Partition being written
        partition: Partition,
        /// Backend error description
        reason: String,
    },

    /// A read failed at the backend
    #[error("Failed to read from '{partition}': {reason}")]
    StorageReadFailed {
        /// Partition being read
        partition: Partition,
        /// Backend error description
        reason: String,
    },

    /// Network or server error on a remote call
    #[error("Remote call failed: {0}")]
    RemoteFetchFailed(String),

    /// The remote answered but signalled failure
    #[error("Remote did not acknowledge: {0}")]
    RemoteAckMissing(String),

    /// Another operation currently holds the partition
    #[error("Partition '{partition}' is busy ({operation} in progress)")]
    Busy {
        /// Operation holding the partition
        operation: &'static str,
        /// The contended partition
        partition: Partition,
    },

    /// A domain validation error
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl OfflineError {
    /// Returns true for failures of the remote source
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            OfflineError::RemoteFetchFailed(_) | OfflineError::RemoteAckMissing(_)
        )
    }

    /// Returns true for failures of the local backend
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            OfflineError::StorageUnavailable(_)
                | OfflineError::StorageWriteFailed { .. }
                | OfflineError::StorageReadFailed { .. }
        )
    }
}
