//! Relay config: Telegram connectivity, event channel, directory URL and logging. Loaded from env.

use anyhow::Result;
use directory_client::DEFAULT_DIRECTORY_URL;
use event_channel::{normalize_redis_url, DEFAULT_CHANNEL, DEFAULT_REDIS_ADDR};
use relay_telegram::TelegramConfig;
use std::env;

/// Full relay config. Use [`RelayConfig::load`] then [`RelayConfig::validate`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub telegram: TelegramConfig,
    /// REDIS_URL, normalized to a `redis://` URL
    pub redis_url: String,
    /// EVENT_CHANNEL
    pub event_channel: String,
    /// DIRECTORY_URL: users collection of the directory service
    pub directory_url: String,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
}

impl RelayConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let redis_addr = env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIS_ADDR.to_string());
        let event_channel =
            env::var("EVENT_CHANNEL").unwrap_or_else(|_| DEFAULT_CHANNEL.to_string());
        let directory_url =
            env::var("DIRECTORY_URL").unwrap_or_else(|_| DEFAULT_DIRECTORY_URL.to_string());
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            telegram,
            redis_url: normalize_redis_url(&redis_addr),
            event_channel,
            directory_url,
            log_file,
        })
    }

    /// Validate config. Call after load() to fail fast before connecting anywhere.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if reqwest::Url::parse(&self.directory_url).is_err() {
            anyhow::bail!("DIRECTORY_URL is not a valid URL: {}", self.directory_url);
        }
        if self.event_channel.trim().is_empty() {
            anyhow::bail!("EVENT_CHANNEL is empty");
        }
        Ok(())
    }
}
