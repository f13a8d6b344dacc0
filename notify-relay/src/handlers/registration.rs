//! Registers the sender of `/start` in the user directory, then acknowledges in the chat.
//!
//! Check-then-create is not locked: two concurrent `/start` from the same chat may both see
//! "absent" and both create. The directory's uniqueness constraint on `chatID` decides.

use async_trait::async_trait;
use directory_client::DirectoryClient;
use relay_core::{Bot, Handler, HandlerResponse, Message, Result, UserRecord};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Sent after a successful registration and when the user was already registered.
pub const WELCOME_TEXT: &str = "Welcome!";
/// Sent when the existence check could not be made.
pub const LOOKUP_FAILED_TEXT: &str = "Error checking user existence";
/// Sent when the directory refused or failed the create.
pub const CREATE_FAILED_TEXT: &str = "Error creating user";

const START_COMMAND: &str = "/start";

/// Result of one registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    AlreadyRegistered,
    Registered,
    LookupFailed,
    CreateFailed,
}

impl RegistrationOutcome {
    /// Chat text for this outcome. Both success paths share the same text.
    pub fn acknowledgment(self) -> &'static str {
        match self {
            Self::AlreadyRegistered | Self::Registered => WELCOME_TEXT,
            Self::LookupFailed => LOOKUP_FAILED_TEXT,
            Self::CreateFailed => CREATE_FAILED_TEXT,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::AlreadyRegistered | Self::Registered)
    }
}

/// True for `/start`, `/start@<bot_username>` and either followed by an argument.
///
/// A `@username` suffix must match `bot_username` (case-insensitive) when the username is known.
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(command) = text.split_whitespace().next() else {
        return false;
    };
    match command.split_once('@') {
        None => command == START_COMMAND,
        Some((name, target)) => {
            name == START_COMMAND
                && !target.is_empty()
                && bot_username.map_or(true, |me| me.eq_ignore_ascii_case(target))
        }
    }
}

/// Handles `/start`: ensures a directory record exists for the chat and replies with the outcome.
pub struct RegistrationHandler {
    directory: Arc<dyn DirectoryClient>,
    bot: Arc<dyn Bot>,
    bot_username: Option<String>,
}

impl RegistrationHandler {
    pub fn new(
        directory: Arc<dyn DirectoryClient>,
        bot: Arc<dyn Bot>,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            directory,
            bot,
            bot_username,
        }
    }

    /// Checks the directory and creates the record when absent. Errors are logged, not returned.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    pub async fn register(&self, message: &Message) -> RegistrationOutcome {
        let chat_id = message.chat.id;

        let exists = match self.directory.exists(chat_id).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(error = %e, chat_id, "Failed to check user existence");
                return RegistrationOutcome::LookupFailed;
            }
        };

        if exists {
            info!(chat_id, "step: user already registered");
            return RegistrationOutcome::AlreadyRegistered;
        }

        let record = UserRecord::from_message(message);
        if let Err(e) = self.directory.create(&record).await {
            error!(error = %e, chat_id, "Failed to create user");
            return RegistrationOutcome::CreateFailed;
        }

        info!(chat_id, telegram_id = record.telegram_id, "step: user registered");
        RegistrationOutcome::Registered
    }
}

#[async_trait]
impl Handler for RegistrationHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !is_start_command(&message.content, self.bot_username.as_deref()) {
            return Ok(HandlerResponse::Ignore);
        }

        let outcome = self.register(message).await;
        let text = outcome.acknowledgment();
        self.bot.send_message(message.chat.id, text).await?;

        if outcome.is_success() {
            info!(chat_id = message.chat.id, "step: registration acknowledged");
        } else {
            warn!(chat_id = message.chat.id, ?outcome, "Registration failed, user notified");
        }

        Ok(HandlerResponse::Reply(text.to_string()))
    }
}
