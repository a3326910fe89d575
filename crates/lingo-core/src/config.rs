//! Configuration module for Lingo.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::Partition;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Lingo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub connectivity: ConnectivityConfig,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

/// Remote content API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Local store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Space the store is allowed to use, in MiB. Drives capacity reports.
    pub quota_mb: u64,
}

/// Reachability probe settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Seconds between two probes.
    pub probe_interval_secs: u64,
    /// Milliseconds before a TCP connect attempt counts as unreachable.
    pub probe_timeout_ms: u64,
}

/// Content download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Partitions fetched by `lingo download`, in order.
    pub partitions: Vec<Partition>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(error = %format!("{err:#}"), "Using default configuration");
                Self::default()
            }
        }
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/lingo/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("lingo")
            .join("config.yaml")
    }

    /// Quota of the local store in bytes.
    pub fn quota_bytes(&self) -> u64 {
        self.storage.quota_mb.saturating_mul(1024 * 1024)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                .join("lingo")
                .join("offline.db"),
            quota_mb: 512,
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: 15,
            probe_timeout_ms: 3000,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            partitions: Partition::DOWNLOADABLE.to_vec(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"api.timeout_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ValidationError {
                field: field.into(),
                message,
            })
        };

        // --- api ---
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            push("api.base_url", "must not be empty".into());
        } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            push(
                "api.base_url",
                format!("must start with http:// or https://, got '{base_url}'"),
            );
        }
        if self.api.timeout_secs == 0 {
            push("api.timeout_secs", "must be greater than 0".into());
        }
        if matches!(&self.api.token, Some(token) if token.trim().is_empty()) {
            push("api.token", "must not be blank when set".into());
        }

        // --- storage ---
        if self.storage.database_path.as_os_str().is_empty() {
            push("storage.database_path", "must not be empty".into());
        }
        if self.storage.quota_mb == 0 {
            push("storage.quota_mb", "must be greater than 0".into());
        }

        // --- connectivity ---
        if self.connectivity.probe_interval_secs == 0 {
            push("connectivity.probe_interval_secs", "must be greater than 0".into());
        }
        if self.connectivity.probe_timeout_ms == 0 {
            push("connectivity.probe_timeout_ms", "must be greater than 0".into());
        } else if self.connectivity.probe_timeout_ms
            > self.connectivity.probe_interval_secs.saturating_mul(1000)
            && self.connectivity.probe_interval_secs > 0
        {
            push(
                "connectivity.probe_timeout_ms",
                format!(
                    "probe_timeout_ms ({}) must not exceed the probe interval ({}s)",
                    self.connectivity.probe_timeout_ms, self.connectivity.probe_interval_secs
                ),
            );
        }

        // --- download ---
        if self.download.partitions.is_empty() {
            push("download.partitions", "must list at least one partition".into());
        }
        for partition in &self.download.partitions {
            if !Partition::DOWNLOADABLE.contains(partition) {
                push(
                    "download.partitions",
                    format!("'{partition}' has no downloadable content"),
                );
            }
        }
        let mut seen = Vec::new();
        for partition in &self.download.partitions {
            if seen.contains(partition) {
                push("download.partitions", format!("'{partition}' is listed twice"));
            }
            seen.push(*partition);
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            push(
                "logging.level",
                format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            );
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use lingo_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .api_base_url("https://lingo.example.com/api")
///     .storage_quota_mb(256)
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- api ---

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api.token = Some(token.into());
        self
    }

    pub fn api_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.api.timeout_secs = seconds;
        self
    }

    // --- storage ---

    pub fn storage_database_path(mut self, path: PathBuf) -> Self {
        self.config.storage.database_path = path;
        self
    }

    pub fn storage_quota_mb(mut self, mb: u64) -> Self {
        self.config.storage.quota_mb = mb;
        self
    }

    // --- connectivity ---

    pub fn connectivity_probe_interval_secs(mut self, seconds: u64) -> Self {
        self.config.connectivity.probe_interval_secs = seconds;
        self
    }

    pub fn connectivity_probe_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connectivity.probe_timeout_ms = ms;
        self
    }

    // --- download ---

    pub fn download_partitions(mut self, partitions: Vec<Partition>) -> Self {
        self.config.download.partitions = partitions;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
