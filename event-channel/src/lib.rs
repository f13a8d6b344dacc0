//! # event-channel
//!
//! Subscription to a single named pub/sub channel. Each received [`Event`] carries an opaque text
//! payload that the relay forwards verbatim.

mod error;
mod redis_subscription;
mod subscription;

pub use error::{Result, SubscriptionError};
pub use redis_subscription::{normalize_redis_url, ping, RedisSubscription, DEFAULT_REDIS_ADDR};
pub use subscription::{Event, EventSubscription, DEFAULT_CHANNEL};
