//! Adapters from Telegram (teloxide) types to relay_core types.

use relay_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            language_code: self.0.language_code.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(|| User {
                id: 0,
                username: None,
                first_name: None,
                last_name: None,
                language_code: None,
            });

        Message {
            id: self.0.id.to_string(),
            user,
            chat: Chat { id: self.0.chat.id.0 },
            content: self.0.text().unwrap_or("").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teloxide_user(language_code: Option<&str>, last_name: Option<&str>) -> teloxide::types::User {
        teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: last_name.map(str::to_string),
            username: Some("testuser".to_string()),
            language_code: language_code.map(str::to_string),
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    /// **Test: TelegramUserWrapper carries id, names, username and locale into the core User.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide_user(Some("en"), Some("User"));

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username.as_deref(), Some("testuser"));
        assert_eq!(core_user.first_name.as_deref(), Some("Test"));
        assert_eq!(core_user.last_name.as_deref(), Some("User"));
        assert_eq!(core_user.language_code.as_deref(), Some("en"));
    }

    /// **Test: missing optional sender fields stay absent.**
    #[test]
    fn test_telegram_user_wrapper_without_optional_fields() {
        let user = teloxide_user(None, None);

        let core_user = TelegramUserWrapper(&user).to_core();

        assert!(core_user.last_name.is_none());
        assert!(core_user.language_code.is_none());
    }
}
