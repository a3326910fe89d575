//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ILocalStore`] - Partitioned local persistence
//! - [`IRemoteApi`] - Remote content download and sync push
//! - [`IConnectivity`] - Current network status
//! - [`INotificationService`] - Toasts, banners and progress reporting

pub mod connectivity;
pub mod local_store;
pub mod notification;
pub mod remote_api;

pub use connectivity::{IConnectivity, StaticConnectivity};
pub use local_store::ILocalStore;
pub use notification::{INotificationService, Notification, NotificationPriority, OFFLINE_BANNER_ID};
pub use remote_api::{Ack, ContentResponse, IRemoteApi};
