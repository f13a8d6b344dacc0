//! Bot construction and the REPL runner: converts teloxide messages to core::Message and passes each
//! one to the handler in its own task.

use anyhow::{Context, Result};
use relay_core::{Handler, HandlerResponse, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;
use super::config::TelegramConfig;

/// Builds the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_bot(config: &TelegramConfig) -> Result<Bot> {
    let bot = Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Calls getMe; a failure here means the token or Bot API is unusable. Returns the bot username.
#[instrument(skip(bot))]
pub async fn verify_bot(bot: &Bot) -> Result<Option<String>> {
    let me = bot
        .get_me()
        .await
        .context("Failed to connect to Telegram (getMe)")?;
    let username = me.user.username.clone();
    info!(bot_id = me.user.id.0, username = ?username, "Telegram bot verified");
    Ok(username)
}

/// Starts the REPL with the given teloxide Bot and handler. Returns when the REPL stops (Ctrl-C).
#[instrument(skip(bot, handler))]
pub async fn run_repl(bot: Bot, handler: Arc<dyn Handler>) -> Result<()> {
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let handler = handler.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                message_content = %core_msg.content,
                "Received message"
            );

            // Handle in a spawned task so the REPL returns immediately
            tokio::spawn(async move {
                match handler.handle(&core_msg).await {
                    Ok(HandlerResponse::Reply(text)) => {
                        info!(
                            chat_id = core_msg.chat.id,
                            message_id = %core_msg.id,
                            reply = %text,
                            "Replied"
                        );
                    }
                    Ok(HandlerResponse::Ignore) => {}
                    Err(e) => {
                        error!(
                            error = %e,
                            chat_id = core_msg.chat.id,
                            message_id = %core_msg.id,
                            "Handler failed"
                        );
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_bot_default_api() {
        let config = TelegramConfig::with_token("123:abc".to_string());
        assert!(build_bot(&config).is_ok());
    }

    #[test]
    fn test_build_bot_custom_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("http://127.0.0.1:8081".to_string());

        let bot = build_bot(&config).unwrap();

        assert_eq!(bot.api_url().as_str(), "http://127.0.0.1:8081/");
    }

    #[test]
    fn test_build_bot_invalid_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("::bad::".to_string());
        assert!(build_bot(&config).is_err());
    }
}
