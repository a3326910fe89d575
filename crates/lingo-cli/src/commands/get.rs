//! Get command - Print stored records
//!
//! With an id, prints that record (or reports it missing); without one,
//! prints the whole partition.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use lingo_core::domain::{Partition, RecordId};

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Partition to read
    pub partition: Partition,
    /// Record id (`key` for userSettings)
    pub id: Option<RecordId>,
}

impl GetCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let store = ctx.open_store().await?;

        let value = match &self.id {
            Some(id) => {
                let record = store
                    .get(self.partition, id)
                    .await
                    .with_context(|| format!("Failed to read '{id}' from '{}'", self.partition))?;
                match record {
                    Some(record) => record.into_value(),
                    None => {
                        formatter.error(&format!("No record '{id}' in '{}'", self.partition));
                        return Ok(());
                    }
                }
            }
            None => {
                let records = store
                    .get_all(self.partition)
                    .await
                    .with_context(|| format!("Failed to read '{}'", self.partition))?;
                Value::Array(records.into_iter().map(|r| r.into_value()).collect())
            }
        };

        if ctx.format.is_json() {
            formatter.print_json(&value);
        } else {
            match value {
                Value::Array(items) => {
                    formatter.success(&format!("{} record(s) in '{}'", items.len(), self.partition));
                    for item in items {
                        formatter.info(&item.to_string());
                    }
                }
                other => formatter.info(&other.to_string()),
            }
        }
        Ok(())
    }
}
