//! Authenticated HTTP client for the Notion REST API

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{Block, DatabaseQuery, Page, Paginated};
use crate::config::NotionSettings;

/// Result type alias for Notion operations
pub type Result<T> = std::result::Result<T, NotionError>;

/// Errors raised while talking to Notion
#[derive(Error, Debug)]
pub enum NotionError {
    /// A required setting (named by its environment variable) is missing
    #[error("{0} is not set")]
    MissingConfig(&'static str),

    /// Connection, TLS or body transfer failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Notion API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Notion API client bound to one integration token
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    token: String,
}

impl NotionClient {
    /// Create a client for the given settings and token
    pub fn new(settings: &NotionSettings, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
            token: token.to_string(),
        }
    }

    /// Query a database: `POST /databases/{id}/query`
    pub async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Paginated<Page>> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        tracing::debug!("POST {}", url);
        self.send(self.http.post(&url).json(query)).await
    }

    /// List one page of a block's children: `GET /blocks/{id}/children`
    pub async fn block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<Block>> {
        let url = format!("{}/blocks/{}/children", self.base_url, block_id);
        tracing::debug!("GET {} (cursor: {:?})", url, start_cursor);

        let mut request = self
            .http
            .get(&url)
            .query(&[("page_size", page_size.to_string())]);
        if let Some(cursor) = start_cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.api_version)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
