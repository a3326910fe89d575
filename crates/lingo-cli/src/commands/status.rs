//! Status command - Display local store contents and capacity
//!
//! Shows the record count of every partition (placeholders counted
//! separately) and the live storage usage.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use lingo_core::domain::Partition;
use lingo_core::usecases::ReportCapacityUseCase;

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let store = ctx.open_store().await?;

        let mut rows = Vec::with_capacity(Partition::ALL.len());
        for partition in Partition::ALL {
            let records = store
                .get_all(partition)
                .await
                .with_context(|| format!("Failed to read '{partition}'"))?;
            let placeholders = records.iter().filter(|r| r.is_synthetic()).count();
            rows.push((partition, records.len(), placeholders));
        }

        let capacity = ReportCapacityUseCase::new(store).report().await;

        if ctx.format.is_json() {
            let partitions: serde_json::Map<_, _> = rows
                .iter()
                .map(|(partition, records, placeholders)| {
                    (
                        partition.as_str().to_string(),
                        json!({"records": records, "placeholders": placeholders}),
                    )
                })
                .collect();
            formatter.print_json(&json!({
                "database": ctx.config.storage.database_path,
                "partitions": partitions,
                "storage": capacity,
            }));
            return Ok(());
        }

        formatter.success("Lingo offline store");
        formatter.field("database", &ctx.config.storage.database_path.display().to_string());
        formatter.info("");
        for (partition, records, placeholders) in &rows {
            let line = if *placeholders > 0 {
                format!("{records} ({placeholders} placeholder)")
            } else {
                records.to_string()
            };
            formatter.field(partition.as_str(), &line);
        }
        formatter.info("");
        if capacity.info.is_unavailable() {
            formatter.field("storage", "unavailable");
        } else {
            formatter.field(
                "storage",
                &format!(
                    "{} of {} ({:.1}%)",
                    capacity.used_display, capacity.quota_display, capacity.info.used_percentage
                ),
            );
        }
        Ok(())
    }
}
