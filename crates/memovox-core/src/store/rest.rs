//! PostgREST-backed memo store (Supabase-compatible).
//!
//! Rows live in the `voice_memos` table behind `{url}/rest/v1/`. All calls
//! authenticate with the access key both as `apikey` and as a bearer token,
//! which is how Supabase expects service keys.

use async_trait::async_trait;

use super::{MemoStore, StoreError};
use crate::config::StoreConfig;
use crate::http::get_http_client;
use crate::memo::{MEMO_TABLE, Memo, NewMemo};

pub struct RestMemoStore {
    base_url: String,
    key: String,
    connected: bool,
}

impl RestMemoStore {
    /// Build the client from configuration. Connectedness is decided here,
    /// once, and never re-evaluated: missing or placeholder credentials, or
    /// a malformed URL, leave the store permanently disconnected for this
    /// process.
    pub fn new(config: &StoreConfig) -> Self {
        if !config.is_configured() {
            return Self::disconnected(&config.key);
        }

        match validate_base_url(&config.url) {
            Ok(base_url) => Self {
                base_url,
                key: config.key.clone(),
                connected: true,
            },
            Err(err) => {
                tracing::warn!("store treated as disconnected: {err}");
                Self::disconnected(&config.key)
            }
        }
    }

    fn disconnected(key: &str) -> Self {
        Self {
            base_url: String::new(),
            key: key.to_string(),
            connected: false,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, MEMO_TABLE)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("apikey", &self.key).bearer_auth(&self.key)
    }
}

/// Validate scheme and host, and strip any trailing slash.
fn validate_base_url(url: &str) -> Result<String, StoreError> {
    let trimmed = url.trim();
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(StoreError::InvalidUrl(format!(
            "must start with http:// or https://, got: {trimmed}"
        )));
    }

    let after_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err(StoreError::InvalidUrl(format!("missing host: {trimmed}")));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    StoreError::Api { status, message }
}

#[async_trait]
impl MemoStore for RestMemoStore {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        if !self.connected {
            return Err(StoreError::NotConfigured);
        }

        let client = get_http_client().map_err(|err| StoreError::Http(err.to_string()))?;
        let response = self
            .authorized(client.get(self.table_url()))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            // PostgREST answers 404/400 for unknown relations; either way
            // the table has to be created in the store dashboard.
            Err(StoreError::TableMissing(MEMO_TABLE.to_string()))
        }
    }

    async fn insert(&self, content: &str) -> Result<Memo, StoreError> {
        if !self.connected {
            return Err(StoreError::NotConfigured);
        }
        self.ensure_table().await?;

        let row = NewMemo::now(content);
        let client = get_http_client().map_err(|err| StoreError::Http(err.to_string()))?;
        let response = self
            .authorized(client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        // The insert only counts when the store echoes the row back.
        let mut rows: Vec<Memo> = response
            .json()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Api {
                status: 200,
                message: "insert returned no rows".to_string(),
            });
        }
        Ok(rows.remove(0))
    }

    async fn list_all(&self) -> Result<Vec<Memo>, StoreError> {
        self.ensure_table().await?;

        let client = get_http_client().map_err(|err| StoreError::Http(err.to_string()))?;
        let response = self
            .authorized(client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))
    }
}
