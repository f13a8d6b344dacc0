//! Subscription errors.

use thiserror::Error;

/// Failure receiving from the event channel. None of these are fatal to the fan-out loop.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The message stream ended (connection dropped); the next receive resubscribes.
    #[error("Subscription closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, SubscriptionError>;
