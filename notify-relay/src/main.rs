//! Binary for the notification relay.

use anyhow::Result;
use clap::Parser;
use notify_relay::{load_config, run_relay, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_relay(config).await
        }
    }
}
