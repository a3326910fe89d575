//! Shared wiring for commands
//!
//! Every command builds its adapters from the same loaded configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use lingo_api::{ApiClient, HttpRemoteApi};
use lingo_cache::{DatabasePool, MemoryLocalStore, SqliteLocalStore};
use lingo_core::config::Config;
use lingo_core::ports::{ILocalStore, IRemoteApi};
use lingo_sync::ReachabilityProbe;

use crate::notifier::TerminalNotifier;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

pub struct CliContext {
    pub format: OutputFormat,
    pub config_path: PathBuf,
    pub config: Config,
}

impl CliContext {
    pub fn new(format: OutputFormat, config_path: PathBuf, config: Config) -> Self {
        Self {
            format,
            config_path,
            config,
        }
    }

    /// Refuses to run with a configuration that fails validation
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.config.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!(
            "Invalid configuration in {}: {}",
            self.config_path.display(),
            details.join("; ")
        )
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format)
    }

    pub fn notifier(&self) -> Arc<TerminalNotifier> {
        Arc::new(TerminalNotifier::new(self.format))
    }

    /// Opens the SQLite store, falling back to memory when it cannot be opened
    pub async fn open_store(&self) -> Result<Arc<dyn ILocalStore>> {
        let path = &self.config.storage.database_path;
        match self.open_sqlite().await {
            Ok(store) => {
                info!(path = %path.display(), "Opened local store");
                Ok(store)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "Local store unavailable, using in-memory store for this run"
                );
                let store: Arc<dyn ILocalStore> = Arc::new(MemoryLocalStore::new());
                store
                    .initialize()
                    .await
                    .context("Failed to initialize in-memory store")?;
                Ok(store)
            }
        }
    }

    async fn open_sqlite(&self) -> Result<Arc<dyn ILocalStore>> {
        let pool = DatabasePool::new(&self.config.storage.database_path).await?;
        let store = SqliteLocalStore::new(pool, self.config.quota_bytes());
        store.initialize().await?;
        Ok(Arc::new(store))
    }

    pub fn remote(&self) -> Result<Arc<dyn IRemoteApi>> {
        let client = ApiClient::from_config(&self.config.api).context("Failed to create API client")?;
        Ok(Arc::new(HttpRemoteApi::new(client)))
    }

    pub fn probe(&self) -> Result<ReachabilityProbe> {
        let connectivity = &self.config.connectivity;
        ReachabilityProbe::for_url(
            &self.config.api.base_url,
            Duration::from_secs(connectivity.probe_interval_secs),
            Duration::from_millis(connectivity.probe_timeout_ms),
        )
        .context("Invalid API base URL")
    }
}
