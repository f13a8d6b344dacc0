//! Directory client errors.

use thiserror::Error;

/// Failure talking to the directory. Transport failures are never reported as "not found".
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Connection or request failure (including reading the response body).
    #[error("Directory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The directory answered with a status the operation does not accept.
    #[error("Directory returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body is not the expected JSON shape.
    #[error("Directory response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
