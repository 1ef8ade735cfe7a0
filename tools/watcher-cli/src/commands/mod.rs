//! CLI command implementations.

pub mod clear;
pub mod config;
pub mod list;
pub mod serve;

use clap::{Args, Subcommand};
use watcher_deals::DealStatus;
use watcher_observability::LogFormat;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config and `PORT`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Interface to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Deal data file.
    #[arg(short, long)]
    pub data_file: Option<String>,

    /// Log output format (human or json).
    #[arg(long, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show deals with this status (ready or incomplete).
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<DealStatus>,

    /// Maximum number of deals to show.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Path of the file to create.
        #[arg(default_value = "watcher.toml")]
        path: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_status(s: &str) -> Result<DealStatus, String> {
    DealStatus::from_str(s)
        .ok_or_else(|| format!("unknown status '{}' (expected ready or incomplete)", s))
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::from_str(s)
        .ok_or_else(|| format!("unknown log format '{}' (expected human or json)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Ready"), Ok(DealStatus::Ready));
        assert_eq!(parse_status("incomplete"), Ok(DealStatus::Incomplete));
        assert!(parse_status("posted").is_err());
    }

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format("json"), Ok(LogFormat::Json));
        assert_eq!(parse_log_format("pretty"), Ok(LogFormat::Human));
        assert!(parse_log_format("xml").is_err());
    }
}
