//! CLI module for the dashboard
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the dashboard server
//! - `status` - Print the status of every configured service
//! - `logs` - Print recent log lines of a service
//! - `restart` - Trigger a rollout restart of a service
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! ztr-dashboard serve
//!
//! # One-shot status in another namespace
//! ztr-dashboard status --namespace staging --json
//!
//! # Generate shell completions
//! ztr-dashboard completions bash > ~/.bash_completion.d/ztr-dashboard
//! ```

pub mod completions;
pub mod config;
pub mod logs;
pub mod output;
pub mod restart;
pub mod serve;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::DashboardConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by every command.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Zero-to-Running dashboard
#[derive(Parser, Debug)]
#[command(
    name = "ztr-dashboard",
    version,
    about = "Pod status, live logs and rollout restarts for the Zero-to-Running services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Serve(ServeArgs),
    /// Show the status of every configured service
    Status(StatusArgs),
    /// Print recent log lines of a service
    Logs(LogsArgs),
    /// Trigger a rollout restart of a service
    Restart(RestartArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Flags of `serve`. Environment variables are applied by
/// [`crate::config::DashboardConfig::with_env_overrides`], below these flags.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Override the monitored namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Override the static front-end directory
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Options shared by the one-shot cluster commands.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the monitored namespace
    #[arg(short, long)]
    pub namespace: Option<String>,
}

impl TargetArgs {
    /// Configuration for a one-shot command: file (if present), environment,
    /// then flags.
    pub fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = load_config_file(&self.config)?.with_env_overrides();
        if let Some(ref namespace) = self.namespace {
            config.cluster.namespace = namespace.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Service name
    pub service: String,

    /// Number of lines to print
    #[arg(short, long, default_value_t = crate::logs::DEFAULT_TAIL_LINES)]
    pub lines: u32,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct RestartArgs {
    /// Service name
    pub service: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load `path` if it exists, otherwise fall back to defaults.
pub fn load_config_file(path: &Path) -> anyhow::Result<DashboardConfig> {
    if path.exists() {
        Ok(DashboardConfig::load(Some(path))?)
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        Ok(DashboardConfig::default())
    }
}
