//! Speech-to-text client.
//!
//! One outbound call per uploaded file, language fixed to Korean. Failures
//! never reach the caller as errors: `transcribe_or_fallback` converts them
//! into fixed human-readable fallback strings stored in place of the
//! transcript.

mod google;

pub use google::GoogleSpeech;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Fallback text when the service cannot interpret the audio.
pub const CANNOT_RECOGNIZE: &str = "음성을 인식할 수 없습니다.";
/// Fallback text when the request to the service fails.
pub const REQUEST_FAILED: &str = "Google API 요청 중 오류가 발생했습니다.";

#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    /// The audio was processed but produced no transcript (or could not be
    /// decoded into a recognizable payload at all).
    #[error("speech could not be recognized")]
    Unintelligible,
    /// The network call or the API itself failed.
    #[error("speech API request failed: {0}")]
    Request(String),
}

/// A speech-recognition backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the WAV file at `audio_path`. No retries.
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError>;
}

/// Transcribe `audio_path`, mapping every failure to a fixed fallback
/// string. Always returns text; the caller never sees an error.
pub async fn transcribe_or_fallback(transcriber: &dyn Transcriber, audio_path: &Path) -> String {
    match transcriber.transcribe(audio_path).await {
        Ok(text) => text,
        Err(SpeechError::Unintelligible) => CANNOT_RECOGNIZE.to_string(),
        Err(SpeechError::Request(err)) => {
            tracing::warn!("speech request failed: {err}");
            REQUEST_FAILED.to_string()
        }
    }
}
