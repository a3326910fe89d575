//! Lingo API - HTTP client for the remote content service
//!
//! Provides async access to:
//! - Partition content downloads
//! - Progress pushes
//! - Full-batch sync pushes
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client with status mapping
//! - [`provider`] - `IRemoteApi` implementation over the client

pub mod client;
pub mod provider;

pub use client::ApiClient;
pub use provider::HttpRemoteApi;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when communicating with the content API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The bearer token is missing, invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested endpoint or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests {
        /// Delay requested by the server, if it sent one
        retry_after: Option<Duration>,
    },

    /// The request was rejected for another client-side reason (4xx)
    #[error("Request rejected ({status}): {body}")]
    ClientError { status: u16, body: String },

    /// A server-side error occurred (5xx)
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The client could not be built from the given settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Returns true if the same request may succeed later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::TooManyRequests { .. } | ApiError::ServerError { .. } | ApiError::NetworkError(_)
        )
    }
}
