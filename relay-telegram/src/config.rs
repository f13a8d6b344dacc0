//! Telegram connectivity config. Loaded from env: TELEGRAM_TOKEN (or BOT_TOKEN), TELEGRAM_API_URL
//! (or TELOXIDE_API_URL).

use anyhow::Result;
use std::env;

/// Token and optional Bot API base URL (the latter for pointing at a mock server).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides TELEGRAM_TOKEN / BOT_TOKEN; without any token this fails.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("TELEGRAM_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("TELEGRAM_TOKEN is not set"))?,
        };
        if bot_token.trim().is_empty() {
            anyhow::bail!("TELEGRAM_TOKEN is empty");
        }
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Builds config with the given token; API URL unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Fails if TELEGRAM_API_URL is set but not a valid URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
