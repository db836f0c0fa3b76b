//! Shared HTTP client for all outbound calls.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::time::Duration;

/// Default timeout for speech and store requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the process-wide HTTP client, creating it on first use.
///
/// A single client keeps connection pooling across the speech and store
/// calls issued by every session.
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")
    })
}
