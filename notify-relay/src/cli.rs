//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::RelayConfig;

#[derive(Parser)]
#[command(name = "notify-relay")]
#[command(about = "Telegram notification relay", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env; token can override TELEGRAM_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load RelayConfig from environment. If `token` is provided it overrides TELEGRAM_TOKEN.
pub fn load_config(token: Option<String>) -> Result<RelayConfig> {
    RelayConfig::load(token)
}
