//! Directory record for a registered user.

use serde::{Deserialize, Serialize, Serializer};

use super::message::Message;

/// One registered user as stored by the user directory. `chat_id` is the registration key.
///
/// Field names on the wire follow the directory's JSON shape
/// (`chatID`, `telegramID`, `firstName`, `lastName`, `languageCode`, `username`).
/// Absent optional strings are written as `""`; `null` or a missing key reads back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "chatID")]
    pub chat_id: i64,
    #[serde(rename = "telegramID", default)]
    pub telegram_id: i64,
    #[serde(rename = "firstName", default, serialize_with = "empty_if_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, serialize_with = "empty_if_none")]
    pub last_name: Option<String>,
    #[serde(rename = "languageCode", default, serialize_with = "empty_if_none")]
    pub language_code: Option<String>,
    #[serde(default, serialize_with = "empty_if_none")]
    pub username: Option<String>,
}

impl UserRecord {
    /// Builds the record for the sender of `message`, keyed by the message's chat handle.
    pub fn from_message(message: &Message) -> Self {
        Self {
            chat_id: message.chat.id,
            telegram_id: message.user.id,
            first_name: message.user.first_name.clone(),
            last_name: message.user.last_name.clone(),
            language_code: message.user.language_code.clone(),
            username: message.user.username.clone(),
        }
    }
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
