//! Watch command - Keep the store in step with connectivity
//!
//! Runs the reachability probe and the connectivity monitor until Ctrl-C.
//! Every offline-to-online transition triggers one synchronization.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use lingo_core::usecases::{DownloadContentUseCase, PartitionLocks, SynchronizeUseCase};
use lingo_sync::{ConnectivityMonitor, SyncTrigger};

use crate::context::CliContext;

/// Capacity of the probe-to-monitor event channel
const EVENT_BUFFER: usize = 16;

#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Download the configured partitions before watching
    #[arg(long)]
    pub download: bool,
}

impl WatchCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let notifier = ctx.notifier();
        let store = ctx.open_store().await?;
        let remote = ctx.remote()?;
        let locks = PartitionLocks::new();
        let probe = ctx.probe()?;

        if self.download {
            let download = DownloadContentUseCase::new(
                remote.clone(),
                store.clone(),
                notifier.clone(),
                Arc::clone(&locks),
            );
            let report = download.execute(&ctx.config.download.partitions).await?;
            info!(records = report.total_records(), "Initial download finished");
        }

        let initial = probe.check().await;
        let monitor = Arc::new(ConnectivityMonitor::new(initial, notifier.clone()));
        let trigger: Arc<dyn SyncTrigger> = Arc::new(SynchronizeUseCase::new(
            remote,
            store,
            monitor.clone(),
            notifier,
            locks,
        ));

        let cancel = CancellationToken::new();
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);

        let probe_task = {
            let cancel = cancel.clone();
            let probe = probe.clone();
            tokio::spawn(async move { probe.run(events_tx, initial, cancel).await })
        };

        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    warn!(error = %err, "Failed to listen for Ctrl-C");
                    return;
                }
                info!("Interrupted, shutting down");
                cancel.cancel();
            });
        }

        formatter.success(&format!(
            "Watching {} (currently {initial}); press Ctrl-C to stop",
            probe.target()
        ));

        monitor
            .run(events_rx, trigger, cancel.clone())
            .await
            .context("Connectivity monitor failed")?;
        cancel.cancel();

        match probe_task.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "Reachability probe stopped with an error"),
            Err(err) => warn!(error = %err, "Reachability probe task panicked"),
        }

        formatter.success("Stopped watching");
        Ok(())
    }
}
