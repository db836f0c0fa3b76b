//! Per-session UI state and its transition function.
//!
//! The frontend holds one `SessionState` per interactive session, applies
//! `Action`s to it, and re-renders from the result. The transitions are
//! pure; side effects (transcription, persistence, temp files) live in
//! [`crate::workflow`].

use serde::Serialize;
use std::path::PathBuf;

/// One user's interactive state. Reset to its default after a successful
/// save or a process restart; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Current transcript text; empty when nothing is pending.
    pub text: String,
    /// True while the session is awaiting an uploaded recording.
    pub recording: bool,
    /// Temp-file path of the upload being transcribed. `Some` only between
    /// upload and transcription completion.
    pub audio_file: Option<PathBuf>,
}

/// A user- or workflow-originated state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// "녹음 시작": start awaiting an upload.
    StartRecording,
    /// "녹음 중지": stop without uploading.
    StopRecording,
    /// An upload was written to disk; transcription is about to run.
    BeginTranscription(PathBuf),
    /// Transcription finished (possibly with fallback text) and the temp
    /// file has been removed.
    TranscriptReady(String),
    /// The editor overwrote the transcript.
    Edit(String),
    /// The memo was persisted; the editor resets.
    MemoSaved,
}

impl SessionState {
    /// Apply one action, yielding the next state.
    pub fn apply(mut self, action: Action) -> SessionState {
        match action {
            Action::StartRecording => {
                self.recording = true;
            }
            Action::StopRecording => {
                self.recording = false;
            }
            Action::BeginTranscription(path) => {
                self.recording = false;
                self.audio_file = Some(path);
            }
            Action::TranscriptReady(text) => {
                self.text = text;
                self.audio_file = None;
            }
            Action::Edit(text) => {
                self.text = text;
            }
            Action::MemoSaved => {
                self.text.clear();
            }
        }
        self
    }

    /// Saving is only offered while there is text to save.
    pub fn can_save(&self) -> bool {
        !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_toggles_between_idle_and_recording() {
        let state = SessionState::default();
        assert!(!state.recording);

        let state = state.apply(Action::StartRecording);
        assert!(state.recording);

        let state = state.apply(Action::StopRecording);
        assert!(!state.recording);
    }

    #[test]
    fn stop_without_upload_keeps_text() {
        let state = SessionState {
            text: "이전 메모".to_string(),
            ..Default::default()
        };
        let state = state
            .apply(Action::StartRecording)
            .apply(Action::StopRecording);
        assert_eq!(state.text, "이전 메모");
        assert!(state.audio_file.is_none());
    }

    #[test]
    fn upload_sequence_ends_idle_with_transcript() {
        let path = PathBuf::from("/tmp/upload-1234.wav");

        let state = SessionState::default().apply(Action::StartRecording);
        let state = state.apply(Action::BeginTranscription(path.clone()));
        // Mid-transcription: flag already dropped, temp path held.
        assert!(!state.recording);
        assert_eq!(state.audio_file.as_deref(), Some(path.as_path()));

        let state = state.apply(Action::TranscriptReady("회의록 초안".to_string()));
        assert_eq!(state.text, "회의록 초안");
        assert!(state.audio_file.is_none());
        assert!(!state.recording);
    }

    #[test]
    fn edit_overwrites_text_without_confirmation() {
        let state = SessionState::default()
            .apply(Action::TranscriptReady("원본".to_string()))
            .apply(Action::Edit("수정본".to_string()));
        assert_eq!(state.text, "수정본");
    }

    #[test]
    fn saved_memo_resets_the_editor() {
        let state = SessionState::default()
            .apply(Action::Edit("저장할 내용".to_string()))
            .apply(Action::MemoSaved);
        assert_eq!(state.text, "");
        assert!(!state.can_save());
    }

    #[test]
    fn can_save_requires_text() {
        assert!(!SessionState::default().can_save());
        let state = SessionState::default().apply(Action::Edit("메모".to_string()));
        assert!(state.can_save());
    }
}
