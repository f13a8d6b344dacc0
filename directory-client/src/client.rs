//! [`DirectoryClient`] trait and its reqwest implementation.

use async_trait::async_trait;
use relay_core::UserRecord;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};

use crate::error::{DirectoryError, Result};

/// Base URL of the users collection when `DIRECTORY_URL` is not set.
pub const DEFAULT_DIRECTORY_URL: &str = "http://user-service/users";

/// Directory operations used by the relay. Every call is a single attempt; no retries.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Whether a record keyed by `chat_id` exists. Any non-200 status means absent.
    async fn exists(&self, chat_id: i64) -> Result<bool>;

    /// Creates `user`. Only `201 Created` is success.
    async fn create(&self, user: &UserRecord) -> Result<()>;

    /// All registered users, in directory order.
    async fn list_all(&self) -> Result<Vec<UserRecord>>;
}

/// reqwest-backed [`DirectoryClient`]. Cheap to clone; safe for concurrent use.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// Creates a client for the users collection at `base_url` (e.g. `http://user-service/users`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Collection URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, chat_id: i64) -> String {
        format!("{}/{}", self.base_url, chat_id)
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    #[instrument(skip(self))]
    async fn exists(&self, chat_id: i64) -> Result<bool> {
        let response = self.client.get(self.user_url(chat_id)).send().await?;
        let status = response.status();
        debug!(chat_id, status = status.as_u16(), "step: directory exists done");
        Ok(status == StatusCode::OK)
    }

    #[instrument(skip(self, user), fields(chat_id = user.chat_id))]
    async fn create(&self, user: &UserRecord) -> Result<()> {
        let response = self.client.post(&self.base_url).json(user).send().await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        info!(chat_id = user.chat_id, "step: directory user created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let response = self.client.get(&self.base_url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.bytes().await?;
        let users: Vec<UserRecord> = serde_json::from_slice(&body)?;
        debug!(count = users.len(), "step: directory list_all done");
        Ok(users)
    }
}
