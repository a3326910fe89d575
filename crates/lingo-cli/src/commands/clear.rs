//! Clear command - Empty one partition

use anyhow::Result;
use clap::Args;
use serde_json::json;

use lingo_core::domain::Partition;
use lingo_core::usecases::{ClearPartitionUseCase, PartitionLocks};

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Partition to clear (lessons, vocabulary, activities, progress, userSettings)
    pub partition: Partition,
}

impl ClearCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let store = ctx.open_store().await?;
        let use_case = ClearPartitionUseCase::new(store, PartitionLocks::new());

        match use_case.execute(self.partition).await {
            Ok(removed) => {
                if ctx.format.is_json() {
                    formatter.print_json(&json!({
                        "success": true,
                        "partition": self.partition,
                        "removed": removed,
                    }));
                } else {
                    formatter.success(&format!("Cleared {removed} record(s) from '{}'", self.partition));
                }
                Ok(())
            }
            Err(err) => {
                formatter.error(&format!("Clear failed: {err}"));
                Err(err.into())
            }
        }
    }
}
