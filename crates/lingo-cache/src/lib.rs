//! Lingo Cache - Local partitioned store
//!
//! Durable storage for the five content partitions (`lessons`,
//! `vocabulary`, `activities`, `progress`, `userSettings`).
//!
//! ## Architecture
//!
//! This crate implements the `ILocalStore` port from `lingo-core`. It is a
//! driven (secondary) adapter in the hexagonal architecture.
//!
//! ## Key Components
//!
//! - [`DatabasePool`] - Connection pool with migration support
//! - [`SqliteLocalStore`] - SQLite-backed `ILocalStore`, one table per partition
//! - [`MemoryLocalStore`] - Volatile `ILocalStore` used when SQLite cannot be opened
//! - [`CacheError`] - Error types for cache operations
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lingo_cache::{DatabasePool, SqliteLocalStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pool = DatabasePool::new(Path::new("/home/user/.local/share/lingo/offline.db")).await?;
//! let store = SqliteLocalStore::new(pool, 512 * 1024 * 1024);
//! // Use store as ILocalStore...
//! # Ok(())
//! # }
//! ```

pub mod memory_store;
pub mod pool;
pub mod sqlite_store;

pub use memory_store::MemoryLocalStore;
pub use pool::DatabasePool;
pub use sqlite_store::SqliteLocalStore;

/// Errors that can occur during cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Failed to establish a database connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A database query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored body could not be turned back into a record, or vice versa
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A record was rejected before anything was written
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] lingo_core::domain::DomainError),
}

impl From<sqlx::Error> for CacheError {
    fn from(e: sqlx::Error) -> Self {
        CacheError::QueryFailed(e.to_string())
    }
}
