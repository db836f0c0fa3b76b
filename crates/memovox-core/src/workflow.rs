//! The side-effectful cycles behind the UI: upload→transcribe and save.
//!
//! Handlers call these with the current session state and get the next
//! state back, keeping the HTTP layer free of business logic.

use anyhow::{Context, Result};
use std::io::Write;

use crate::session::{Action, SessionState};
use crate::speech::{Transcriber, transcribe_or_fallback};
use crate::store::{MemoStore, StoreError};

/// Outcome of a save attempt, for the frontend to surface.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    /// Nothing to save; the state comes back unchanged.
    EmptyText,
    /// The store refused; the text is kept for another attempt.
    Failed(StoreError),
}

/// Run one upload cycle: persist the uploaded bytes to a fresh `.wav` temp
/// file, drop the recording flag, transcribe, and store the result (or its
/// fallback text) in the session.
///
/// The temp file is scoped to this call and removed on every exit path:
/// transcription success, fallback, or panic (the guard unlinks on drop).
pub async fn transcribe_upload(
    state: SessionState,
    wav_bytes: &[u8],
    transcriber: &dyn Transcriber,
) -> Result<SessionState> {
    let mut tmp = tempfile::Builder::new()
        .prefix("memovox-upload-")
        .suffix(".wav")
        .tempfile()
        .context("Failed to create temp audio file")?;
    tmp.write_all(wav_bytes)
        .context("Failed to write uploaded audio")?;
    tmp.flush().context("Failed to flush uploaded audio")?;

    let path = tmp.path().to_path_buf();
    let state = state.apply(Action::BeginTranscription(path.clone()));

    let text = transcribe_or_fallback(transcriber, &path).await;

    if let Err(err) = tmp.close() {
        tracing::warn!("failed to remove temp audio file {}: {err}", path.display());
    }

    Ok(state.apply(Action::TranscriptReady(text)))
}

/// Run one save cycle against the store. On success the editor text is
/// cleared; on failure the state comes back untouched and the error is
/// carried for display.
pub async fn save_memo(state: SessionState, store: &dyn MemoStore) -> (SessionState, SaveOutcome) {
    if !state.can_save() {
        return (state, SaveOutcome::EmptyText);
    }

    match store.insert(&state.text).await {
        Ok(memo) => {
            tracing::info!(id = memo.id, "memo saved");
            (state.apply(Action::MemoSaved), SaveOutcome::Saved)
        }
        Err(err) => (state, SaveOutcome::Failed(err)),
    }
}
