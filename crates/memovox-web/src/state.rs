//! Shared application state for the axum frontend.

use std::sync::Arc;

use memovox_core::speech::Transcriber;
use memovox_core::store::MemoStore;

use crate::sessions::SessionRegistry;

pub struct AppState {
    pub store: Arc<dyn MemoStore>,
    pub transcriber: Arc<dyn Transcriber>,
    /// Connection status, computed once at startup and shown in the sidebar
    /// on every render.
    pub store_connected: bool,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(store: Arc<dyn MemoStore>, transcriber: Arc<dyn Transcriber>) -> Self {
        let store_connected = store.is_connected();
        Self {
            store,
            transcriber,
            store_connected,
            sessions: SessionRegistry::new(),
        }
    }
}
