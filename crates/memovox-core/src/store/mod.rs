//! Memo persistence against the remote table-backed store.

mod rest;

pub use rest::RestMemoStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::memo::Memo;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Credentials are missing or still the documented placeholders.
    #[error("store connection is not configured; set STORE_URL and STORE_KEY")]
    NotConfigured,
    /// The memo table does not exist. It must be created out-of-band; the
    /// app never issues schema changes.
    #[error("table '{0}' does not exist in the store")]
    TableMissing(String),
    /// The store rejected the request.
    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The request never got a usable response.
    #[error("store request failed: {0}")]
    Http(String),
    /// The configured store URL is malformed.
    #[error("invalid store URL: {0}")]
    InvalidUrl(String),
}

/// CRUD surface of the memo store. Every operation is synchronous from the
/// caller's point of view: one request, no retries, no compensation.
#[async_trait]
pub trait MemoStore: Send + Sync {
    /// Whether the store credentials were present at startup. Computed once
    /// when the client is built; involves no network.
    fn is_connected(&self) -> bool;

    /// Probe the memo table with a trivial read (`select id limit 1`).
    /// Never attempts to create it.
    async fn ensure_table(&self) -> Result<(), StoreError>;

    /// Insert a new memo with the current timestamp, returning the stored
    /// row as acknowledged by the store.
    async fn insert(&self, content: &str) -> Result<Memo, StoreError>;

    /// All memos, ordered by `created_at` descending (newest first).
    async fn list_all(&self) -> Result<Vec<Memo>, StoreError>;
}
