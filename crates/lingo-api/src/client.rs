//! Content API client
//!
//! Provides a typed HTTP client for the remote learning-content service.
//! Handles the optional bearer token, the request timeout, endpoint
//! construction and the mapping of HTTP statuses onto [`ApiError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use lingo_api::client::ApiClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("https://lingo.example.com/api", Duration::from_secs(30))?
//!     .with_token("token-here");
//! let body: serde_json::Value = client.get_json("/content/lessons").await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use lingo_core::config::ApiConfig;

use crate::ApiError;

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client for the content API
///
/// Wraps `reqwest::Client` with the base URL and optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Bearer token sent with every request, if any
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    /// `ApiError::InvalidConfig` if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Creates a client from the `api` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Sends `token` as a bearer token on every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path
    ///
    /// Prepends the base URL and adds the Authorization header when a token
    /// is configured.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the base URL (e.g., "/content/lessons")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET path`, decoding a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        decode(check_status(response).await?).await
    }

    /// `POST path` with a JSON body, decoding a JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        decode(check_status(response).await?).await
    }
}

// ============================================================================
// Response handling
// ============================================================================

/// Maps non-success statuses onto [`ApiError`]
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();

    warn!(status = status.as_u16(), path = %url, "Request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(body),
        StatusCode::FORBIDDEN => ApiError::Forbidden(body),
        StatusCode::NOT_FOUND => ApiError::NotFound(url),
        StatusCode::TOO_MANY_REQUESTS => ApiError::TooManyRequests { retry_after },
        s if s.is_server_error() => ApiError::ServerError {
            status: s.as_u16(),
            body,
        },
        s => ApiError::ClientError {
            status: s.as_u16(),
            body,
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}
