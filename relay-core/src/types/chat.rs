//! Chat identity type for core messages.

/// Chat (private or group) identity. `id` is the chat handle used for outbound sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
}
