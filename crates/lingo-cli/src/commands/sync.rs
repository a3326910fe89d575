//! Sync command - Push learner data to the server
//!
//! Probes the API host once to decide connectivity, then runs a single
//! synchronization. Offline runs are a no-op.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use lingo_core::ports::StaticConnectivity;
use lingo_core::usecases::{PartitionLocks, SyncOutcome, SynchronizeUseCase};

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct SyncCommand {}

impl SyncCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();

        let probe = ctx.probe()?;
        let state = probe.check().await;
        info!(target_addr = %probe.target(), %state, "Connectivity checked");

        let store = ctx.open_store().await?;
        let use_case = SynchronizeUseCase::new(
            ctx.remote()?,
            store,
            Arc::new(StaticConnectivity(state)),
            ctx.notifier(),
            PartitionLocks::new(),
        );

        match use_case.execute().await {
            Ok(SyncOutcome::SkippedOffline) => {
                if ctx.format.is_json() {
                    formatter.print_json(&json!({"success": true, "skipped": "offline"}));
                } else {
                    formatter.warn(&format!(
                        "{} is unreachable; nothing was synchronized",
                        probe.target()
                    ));
                }
                Ok(())
            }
            Ok(SyncOutcome::Completed(summary)) => {
                if ctx.format.is_json() {
                    formatter.print_json(&json!({"success": true, "summary": summary}));
                    return Ok(());
                }
                formatter.success(&format!("Synchronized in {}ms", summary.duration_ms));
                formatter.field("progress", &summary.progress_pushed.to_string());
                formatter.field("activities", &summary.activities_pushed.to_string());
                formatter.field("vocabulary", &summary.vocabulary_pushed.to_string());
                if summary.synthetic_skipped > 0 {
                    formatter.field("placeholders", &format!("{} kept local", summary.synthetic_skipped));
                }
                formatter.info(&format!("Cleared {} progress record(s)", summary.progress_cleared));
                Ok(())
            }
            Err(err) => {
                formatter.error(&format!("Sync failed: {err}"));
                Err(err.into())
            }
        }
    }
}
