//! memovox: single-page voice-memo web app.
//!
//! Upload a `.wav` recording, transcribe it (Korean), edit the text, save
//! it to the memo store; a sidebar lists saved memos newest first.

mod handlers;
mod render;
mod sessions;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memovox_core::config::{SpeechConfig, StoreConfig};
use memovox_core::speech::GoogleSpeech;
use memovox_core::store::{MemoStore, RestMemoStore};

use state::AppState;

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Uploads beyond this are rejected before they reach a handler.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store_config = StoreConfig::from_env();
    let speech_config = SpeechConfig::from_env();

    let store = RestMemoStore::new(&store_config);
    if store.is_connected() {
        tracing::info!("memo store configured at {}", store_config.url);
    } else {
        tracing::warn!("memo store not configured; saving is disabled");
    }
    if speech_config.api_key.is_empty() {
        tracing::warn!("SPEECH_API_KEY is not set; transcription requests will fail");
    }

    let app_state = Arc::new(AppState::new(
        Arc::new(store) as Arc<dyn MemoStore>,
        Arc::new(GoogleSpeech::new(&speech_config)),
    ));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::index))
        .route("/recording/start", post(handlers::start_recording))
        .route("/recording/stop", post(handlers::stop_recording))
        .route("/upload", post(handlers::upload))
        .route("/text", post(handlers::edit_text))
        .route("/save", post(handlers::save))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(axum::middleware::from_fn(log_requests));

    let addr = std::env::var("MEMOVOX_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!("{method} {path} -> {}", response.status());
    response
}
