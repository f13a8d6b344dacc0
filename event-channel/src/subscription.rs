//! Event type and the subscription seam used by the fan-out loop.

use async_trait::async_trait;

use crate::error::Result;

/// Channel the relay listens on when `EVENT_CHANNEL` is not set.
pub const DEFAULT_CHANNEL: &str = "send_message";

/// One published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub channel: String,
    pub payload: String,
}

impl Event {
    pub fn new(channel: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
        }
    }
}

/// Blocking receive on a single subscription. Errors are per-receive; callers keep calling.
#[async_trait]
pub trait EventSubscription: Send {
    async fn recv(&mut self) -> Result<Event>;
}
