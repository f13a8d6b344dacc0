//! Outbound side of the chat transport.

use async_trait::async_trait;

use crate::error::Result;

/// Sends text to a chat handle. Implementations map to a transport (e.g. Telegram); tests substitute
/// an in-memory recorder.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `text` to the chat identified by `chat_id`.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}
