//! Lingo Core - Domain logic for the offline content cache
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Partition`, `Record`, `SyncBatch`, `StorageInfo`, `ConnectivityState`
//! - **Use cases** - `DownloadContentUseCase`, `SynchronizeUseCase`, `ReportCapacityUseCase`,
//!   `ClearPartitionUseCase`
//! - **Port definitions** - Traits for adapters: `ILocalStore`, `IRemoteApi`, `IConnectivity`,
//!   `INotificationService`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
