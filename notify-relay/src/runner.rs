use anyhow::{Context, Result};
use event_channel::RedisSubscription;
use relay_core::init_tracing;
use relay_telegram::{build_bot, run_repl, verify_bot};
use tokio::sync::oneshot;
use tracing::{error, info, instrument};

use crate::components::build_relay_components;
use crate::config::RelayConfig;
use crate::fanout::FanoutLoop;

/// Main entry: validate config, init logging, check Redis and Telegram (both fatal), then run the
/// fan-out loop on its own task next to the Telegram REPL. When the REPL stops, the loop is told to
/// stop and awaited.
#[instrument(skip(config))]
pub async fn run_relay(config: RelayConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    info!(
        redis_url = %config.redis_url,
        event_channel = %config.event_channel,
        directory_url = %config.directory_url,
        "Initializing relay"
    );

    event_channel::ping(&config.redis_url)
        .await
        .context("Failed to connect to Redis")?;

    let teloxide_bot = build_bot(&config.telegram)?;
    let bot_username = verify_bot(&teloxide_bot).await?;

    let components = build_relay_components(&config, teloxide_bot, bot_username);

    let subscription = RedisSubscription::new(&config.redis_url, &config.event_channel)?;
    info!(channel = %subscription.channel(), "step: event subscription prepared");
    let fanout = FanoutLoop::new(
        subscription,
        components.directory.clone(),
        components.bot.clone(),
    );
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let fanout_task = tokio::spawn(fanout.run(async move {
        let _ = stop_rx.await;
    }));

    info!("Relay started successfully");

    run_repl(components.teloxide_bot.clone(), components.registration.clone()).await?;

    info!("Telegram REPL stopped, shutting down fan-out loop");
    let _ = stop_tx.send(());
    if let Err(e) = fanout_task.await {
        error!(error = %e, "Fan-out task ended abnormally");
    }

    Ok(())
}
