//! Memo records as stored in the `voice_memos` table.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Table the memos live in. Must pre-exist; the app never issues DDL.
pub const MEMO_TABLE: &str = "voice_memos";

/// A saved transcript, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    /// Server-assigned identity.
    pub id: i64,
    pub content: String,
    /// ISO-8601 timestamp string, assigned client-side on insert.
    pub created_at: String,
}

impl Memo {
    /// Timestamp truncated to minute precision, with the `T` separator
    /// normalized to a space: `2026-08-06T14:03:21.123456` → `2026-08-06 14:03`.
    pub fn created_at_display(&self) -> String {
        let truncated: String = self.created_at.chars().take(16).collect();
        truncated.replace('T', " ")
    }
}

/// Row sent to the store on insert; the id is assigned server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewMemo {
    pub content: String,
    pub created_at: String,
}

impl NewMemo {
    pub fn now(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            created_at: current_timestamp(),
        }
    }
}

/// Current local time as a sortable ISO-8601 string.
pub fn current_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
