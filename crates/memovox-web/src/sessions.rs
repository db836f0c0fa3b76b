//! Cookie-keyed in-memory sessions.
//!
//! Each browser gets a `memovox_sid` cookie and an independent session
//! record: the core state machine plus one pending flash notice, consumed
//! at the next render. Nothing here is persisted; a restart empties the
//! registry.

use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Mutex;

use memovox_core::SessionState;

pub const SESSION_COOKIE: &str = "memovox_sid";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// One-shot message rendered above the controls.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: SessionState,
    pub notice: Option<Notice>,
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the session id from the request cookies, minting a fresh one
    /// when absent. The second element is true when the caller must send a
    /// `Set-Cookie` back.
    pub fn resolve(&self, headers: &HeaderMap) -> (String, bool) {
        match cookie_value(headers, SESSION_COOKIE) {
            Some(sid) if !sid.is_empty() => (sid, false),
            _ => (uuid::Uuid::new_v4().to_string(), true),
        }
    }

    /// Run `f` against the session for `sid`, creating it on first touch.
    pub fn with_session<R>(&self, sid: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap();
        f(sessions.entry(sid.to_string()).or_default())
    }

    /// Snapshot the session and clear its pending notice in one step, so a
    /// flash message renders exactly once.
    pub fn take_for_render(&self, sid: &str) -> Session {
        self.with_session(sid, |session| {
            let snapshot = session.clone();
            session.notice = None;
            snapshot
        })
    }
}

/// Extract a cookie value from the `Cookie` header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
