//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends via Telegram; tests
//! substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, RelayError, Result};
use teloxide::{prelude::*, types::ChatId};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }
}
