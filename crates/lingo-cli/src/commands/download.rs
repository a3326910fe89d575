//! Download command - Fill the local store with learning content
//!
//! Fetches each requested partition from the content API. Partitions the
//! server cannot deliver are filled with placeholder content instead, so
//! the command succeeds whenever the local store is writable.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use lingo_core::domain::Partition;
use lingo_core::usecases::{ContentSource, DownloadContentUseCase, PartitionLocks};

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct DownloadCommand {
    /// Partition to download (repeatable; defaults to the configured list)
    #[arg(long = "partition", short = 'p')]
    pub partitions: Vec<Partition>,
}

impl DownloadCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let partitions = if self.partitions.is_empty() {
            ctx.config.download.partitions.clone()
        } else {
            self.partitions.clone()
        };

        let store = ctx.open_store().await?;
        let use_case = DownloadContentUseCase::new(
            ctx.remote()?,
            store,
            ctx.notifier(),
            PartitionLocks::new(),
        );

        info!(count = partitions.len(), "Downloading content");
        let report = match use_case.execute(&partitions).await {
            Ok(report) => report,
            Err(err) => {
                formatter.error(&format!("Download failed: {err}"));
                return Err(err.into());
            }
        };

        if ctx.format.is_json() {
            let rows: Vec<_> = report
                .partitions
                .iter()
                .map(|p| {
                    let (source, reason) = match &p.source {
                        ContentSource::Remote => ("remote", None),
                        ContentSource::Placeholder { reason } => ("placeholder", Some(reason)),
                    };
                    json!({
                        "partition": p.partition,
                        "source": source,
                        "reason": reason,
                        "records": p.records,
                        "skipped": p.skipped,
                        "placeholders_removed": p.placeholders_removed,
                    })
                })
                .collect();
            formatter.print_json(&json!({
                "success": true,
                "partitions": rows,
                "total_records": report.total_records(),
                "duration_ms": report.duration_ms,
            }));
            return Ok(());
        }

        formatter.success(&format!(
            "Downloaded {} records in {}ms",
            report.total_records(),
            report.duration_ms
        ));
        for p in &report.partitions {
            let line = match &p.source {
                ContentSource::Remote if p.skipped > 0 => {
                    format!("{} records ({} without id skipped)", p.records, p.skipped)
                }
                ContentSource::Remote => format!("{} records", p.records),
                ContentSource::Placeholder { reason } => {
                    format!("{} placeholder records ({reason})", p.records)
                }
            };
            let line = if p.placeholders_removed > 0 {
                format!("{line}, replaced {} placeholder(s)", p.placeholders_removed)
            } else {
                line
            };
            formatter.field(p.partition.as_str(), &line);
        }
        let fallback = report.placeholder_partitions();
        if !fallback.is_empty() {
            formatter.warn(&format!(
                "{} partition(s) use placeholder content until the next successful download",
                fallback.len()
            ));
        }
        Ok(())
    }
}
