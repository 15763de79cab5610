//! Network port for the remote user list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::RemoteUser;
use thiserror::Error;

use crate::directory::REMOTE_PAGE_SIZE;

pub const DEFAULT_REMOTE_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("invalid user list payload: {0}")]
    Decode(String),
}

/// One request, two outcomes. Implementations return at most one page of
/// users; anything past [`REMOTE_PAGE_SIZE`] is never looked at.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError>;
}

#[async_trait]
impl<T: RemoteDirectory + ?Sized> RemoteDirectory for std::sync::Arc<T> {
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError> {
        (**self).fetch_users().await
    }
}

pub struct HttpRemoteDirectory {
    http: Client,
    url: String,
}

impl HttpRemoteDirectory {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RemoteDirectory for HttpRemoteDirectory {
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(format!("Failed to fetch students: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "remote user list rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let items: Vec<Value> = response
            .json()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))?;
        let total = items.len();
        let users = first_page(items)?;
        tracing::debug!(url = %self.url, total, kept = users.len(), "fetched remote users");
        Ok(users)
    }
}

/// Types only the leading page of a decoded array.
fn first_page(items: Vec<Value>) -> Result<Vec<RemoteUser>, FetchError> {
    items
        .into_iter()
        .take(REMOTE_PAGE_SIZE)
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|err| FetchError::Decode(format!("user at index {index}: {err}")))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
