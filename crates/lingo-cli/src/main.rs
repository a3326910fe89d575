//! Lingo CLI - Command-line interface for the offline content cache
//!
//! Provides commands for:
//! - Downloading learning content for offline use
//! - Pushing learner data back to the server
//! - Inspecting and clearing local partitions
//! - Watching connectivity and syncing on reconnect

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lingo_core::config::Config;

mod commands;
mod context;
mod notifier;
mod output;

use commands::{
    clear::ClearCommand, completions::CompletionsCommand, config::ConfigCommand,
    download::DownloadCommand, get::GetCommand, status::StatusCommand, sync::SyncCommand,
    watch::WatchCommand,
};
use context::CliContext;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "lingo", version, about = "Offline content cache for Lingo")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download content into the local store
    Download(DownloadCommand),
    /// Push progress and learner data to the server
    Sync(SyncCommand),
    /// Show record counts and storage usage
    Status(StatusCommand),
    /// Remove every record of one partition
    Clear(ClearCommand),
    /// Print stored records
    Get(GetCommand),
    /// Watch connectivity and sync whenever the network returns
    Watch(WatchCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Commands {
    /// Commands that only inspect or edit the configuration run even when it
    /// is invalid
    fn needs_valid_config(&self) -> bool {
        !matches!(self, Commands::Config(_) | Commands::Completions(_))
    }
}

/// Picks the log filter: `RUST_LOG` wins, then `-v`, then the config file
fn log_filter(verbose: u8, config_level: &str) -> EnvFilter {
    let level = match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, &config.logging.level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CliContext::new(format, config_path, config);

    if cli.command.needs_valid_config() {
        ctx.ensure_valid()?;
    }

    match cli.command {
        Commands::Download(cmd) => cmd.execute(&ctx).await,
        Commands::Sync(cmd) => cmd.execute(&ctx).await,
        Commands::Status(cmd) => cmd.execute(&ctx).await,
        Commands::Clear(cmd) => cmd.execute(&ctx).await,
        Commands::Get(cmd) => cmd.execute(&ctx).await,
        Commands::Watch(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}
