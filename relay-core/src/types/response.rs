//! Handler result type.

/// What a handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// The message was not for this handler.
    Ignore,
    /// The handler answered; carries the text sent back to the chat.
    Reply(String),
}
