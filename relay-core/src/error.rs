//! Error types for the relay core.

use thiserror::Error;

/// Error returned by handlers and the outbound transport.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
