//! Redis pub/sub implementation of [`EventSubscription`].

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use tracing::{info, instrument, warn};

use crate::error::{Result, SubscriptionError};
use crate::subscription::{Event, EventSubscription};

/// Redis address used when `REDIS_URL` is not set.
pub const DEFAULT_REDIS_ADDR: &str = "localhost:6379";

const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

/// Turns a bare `host:port` into a `redis://` URL; full URLs pass through.
pub fn normalize_redis_url(addr: &str) -> String {
    let addr = addr.trim();
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{}", addr)
    }
}

/// Payloads are opaque text; invalid UTF-8 is replaced rather than dropping the event.
fn payload_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Startup connectivity check: opens a connection and sends `PING`.
#[instrument(skip(url))]
pub async fn ping(url: &str) -> Result<()> {
    let client = redis::Client::open(url)?;
    let mut conn = client.get_multiplexed_async_connection().await?;
    let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
    info!(reply = %pong, "Redis ping ok");
    Ok(())
}

/// Dedicated pub/sub connection subscribed to one channel.
///
/// The subscription is opened on the first `recv`.
/// When the stream ends, `recv` reports [`SubscriptionError::Closed`] once; the following `recv`
/// waits `resubscribe_delay` and opens a fresh subscription.
pub struct RedisSubscription {
    client: redis::Client,
    channel: String,
    messages: Option<BoxStream<'static, redis::Msg>>,
    lost: bool,
    resubscribe_delay: Duration,
}

impl RedisSubscription {
    /// Prepares a subscription to `channel` at `url` without connecting.
    pub fn new(url: &str, channel: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            channel: channel.to_string(),
            messages: None,
            lost: false,
            resubscribe_delay: RESUBSCRIBE_DELAY,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_resubscribe_delay(mut self, delay: Duration) -> Self {
        self.resubscribe_delay = delay;
        self
    }

    /// Channel this subscription listens on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    async fn subscribe(&mut self) -> Result<()> {
        if self.lost {
            tokio::time::sleep(self.resubscribe_delay).await;
        }
        let mut pubsub = match self.client.get_async_pubsub().await {
            Ok(pubsub) => pubsub,
            Err(e) => {
                self.lost = true;
                return Err(e.into());
            }
        };
        if let Err(e) = pubsub.subscribe(&self.channel).await {
            self.lost = true;
            return Err(e.into());
        }
        self.messages = Some(pubsub.into_on_message().boxed());
        self.lost = false;
        info!(channel = %self.channel, "Subscribed to event channel");
        Ok(())
    }
}

#[async_trait]
impl EventSubscription for RedisSubscription {
    async fn recv(&mut self) -> Result<Event> {
        if self.messages.is_none() {
            self.subscribe().await?;
        }
        let messages = self.messages.as_mut().ok_or(SubscriptionError::Closed)?;

        let next = messages.next().await;
        match next {
            Some(msg) => {
                let payload = payload_text(msg.get_payload_bytes());
                Ok(Event::new(msg.get_channel_name(), payload))
            }
            None => {
                warn!(channel = %self.channel, "Event stream ended, will resubscribe");
                self.messages = None;
                self.lost = true;
                Err(SubscriptionError::Closed)
            }
        }
    }
}
