//! # directory-client
//!
//! Talks to the external user directory over HTTP/JSON. The directory owns persistence and the
//! uniqueness of `chatID`; this crate only translates `exists`, `create` and `list_all` into requests.

mod client;
mod error;

pub use client::{DirectoryClient, HttpDirectoryClient, DEFAULT_DIRECTORY_URL};
pub use error::{DirectoryError, Result};
pub use relay_core::UserRecord;
