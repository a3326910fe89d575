//! Config command - View and manage Lingo configuration
//!
//! Provides the `lingo config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON), token masked
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors
//! 4. Prints the configuration file location

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tracing::info;

use lingo_core::config::Config;
use lingo_core::domain::Partition;

use crate::context::CliContext;

const MASKED_TOKEN: &str = "********";

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "api.base_url")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Set { key, value } => self.execute_set(ctx, key, value),
            ConfigCommand::Validate => self.execute_validate(ctx),
            ConfigCommand::Path => {
                if ctx.format.is_json() {
                    ctx.formatter()
                        .print_json(&json!({"config_path": ctx.config_path.display().to_string()}));
                } else {
                    println!("{}", ctx.config_path.display());
                }
                Ok(())
            }
        }
    }

    fn execute_show(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let mut config = ctx.config.clone();
        if config.api.token.is_some() {
            config.api.token = Some(MASKED_TOKEN.to_string());
        }

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");
            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }
        Ok(())
    }

    fn execute_set(&self, ctx: &CliContext, key: &str, value: &str) -> Result<()> {
        let formatter = ctx.formatter();
        let mut config = ctx.config.clone();

        info!(key, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            if ctx.format.is_json() {
                formatter.print_json(&json!({"success": false, "key": key, "error": e.to_string()}));
            } else {
                formatter.error(&format!("Failed to set '{key}': {e}"));
                formatter.info("");
                formatter.info("Supported keys:");
                for key in SUPPORTED_KEYS {
                    formatter.info(&format!("  {key}"));
                }
            }
            return Ok(());
        }

        let errors: Vec<String> = config.validate().iter().map(|e| e.to_string()).collect();
        if !errors.is_empty() {
            if ctx.format.is_json() {
                formatter.print_json(&json!({"success": false, "key": key, "errors": errors}));
            } else {
                formatter.error(&format!("Invalid value for '{key}': {}", errors.join("; ")));
            }
            return Ok(());
        }

        if let Some(parent) = ctx.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        std::fs::write(&ctx.config_path, yaml).context("Failed to write configuration file")?;

        if ctx.format.is_json() {
            formatter.print_json(&json!({
                "success": true,
                "key": key,
                "config_path": ctx.config_path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {key}"));
            formatter.info(&format!("Saved to {}", ctx.config_path.display()));
        }
        Ok(())
    }

    fn execute_validate(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let path = &ctx.config_path;

        if !path.exists() {
            if ctx.format.is_json() {
                formatter.print_json(&json!({
                    "valid": true,
                    "config_path": path.display().to_string(),
                    "defaults": true,
                }));
            } else {
                formatter.info(&format!("Configuration file not found at {}", path.display()));
                formatter.info("Using default configuration.");
            }
            return Ok(());
        }

        // Load explicitly: parse errors must be reported, not defaulted away.
        let config = match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                if ctx.format.is_json() {
                    formatter.print_json(&json!({
                        "valid": false,
                        "config_path": path.display().to_string(),
                        "errors": [format!("{e:#}")],
                    }));
                } else {
                    formatter.error(&format!("{e:#}"));
                }
                return Ok(());
            }
        };

        let errors = config.validate();
        if ctx.format.is_json() {
            let errors: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&json!({
                "valid": errors.is_empty(),
                "config_path": path.display().to_string(),
                "errors": errors,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", path.display()));
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }
        Ok(())
    }
}

const SUPPORTED_KEYS: &[&str] = &[
    "api.base_url",
    "api.token                       - empty or \"none\" to unset",
    "api.timeout_secs",
    "storage.database_path",
    "storage.quota_mb",
    "connectivity.probe_interval_secs",
    "connectivity.probe_timeout_ms",
    "download.partitions             - comma-separated partition names",
    "logging.level                   - trace|debug|info|warn|error",
];

/// Apply a dot-notation key/value pair to a Config struct
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api.base_url" => config.api.base_url = value.to_string(),
        "api.token" => {
            config.api.token = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "api.timeout_secs" => {
            config.api.timeout_secs = value
                .parse::<u64>()
                .context("Expected a positive integer for api.timeout_secs")?;
        }
        "storage.database_path" => config.storage.database_path = PathBuf::from(value),
        "storage.quota_mb" => {
            config.storage.quota_mb = value
                .parse::<u64>()
                .context("Expected a positive integer for storage.quota_mb")?;
        }
        "connectivity.probe_interval_secs" => {
            config.connectivity.probe_interval_secs = value
                .parse::<u64>()
                .context("Expected a positive integer")?;
        }
        "connectivity.probe_timeout_ms" => {
            config.connectivity.probe_timeout_ms = value
                .parse::<u64>()
                .context("Expected a positive integer")?;
        }
        "download.partitions" => {
            config.download.partitions = value
                .split(',')
                .map(|name| name.trim().parse::<Partition>())
                .collect::<Result<_, _>>()
                .context("Expected a comma-separated list of partitions")?;
        }
        "logging.level" => config.logging.level = value.to_string(),
        _ => anyhow::bail!("Unknown configuration key: '{}'", key),
    }
    Ok(())
}
