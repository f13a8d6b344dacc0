//! Inbound interaction from the chat transport.

use super::{chat::Chat, user::User};

/// A single inbound message: who sent it, in which chat, and its text. `id` is the transport's
/// message id, used for log correlation.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
}
