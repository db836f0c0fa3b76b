//! Google Cloud Speech transcription via the `speech:recognize` REST call.
//!
//! The uploaded WAV is decoded to mono LINEAR16 and submitted inline
//! (base64) in a single JSON request. An empty result set means the service
//! could not interpret the audio.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{SpeechError, Transcriber};
use crate::audio::read_wav_linear16;
use crate::config::SpeechConfig;
use crate::http::get_http_client;

const RECOGNIZE_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Google Cloud Speech client.
pub struct GoogleSpeech {
    api_key: String,
    language: String,
    endpoint: String,
}

impl GoogleSpeech {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            endpoint: RECOGNIZE_URL.to_string(),
        }
    }

    /// Override the API endpoint (self-hosted proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize, Default)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Deserialize)]
struct RecognizeAlternative {
    #[serde(default)]
    transcript: String,
}

/// Join the top alternative of each result; `None` when the service
/// returned nothing usable.
fn first_transcript(response: RecognizeResponse) -> Option<String> {
    let parts: Vec<String> = response
        .results
        .into_iter()
        .filter_map(|result| result.alternatives.into_iter().next())
        .map(|alt| alt.transcript)
        .filter(|t| !t.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[async_trait]
impl Transcriber for GoogleSpeech {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError> {
        // A WAV the decoder rejects can never be recognized; no request is made.
        let audio = read_wav_linear16(audio_path).map_err(|err| {
            tracing::debug!("unreadable upload: {err:#}");
            SpeechError::Unintelligible
        })?;

        let payload = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: audio.sample_rate,
                language_code: &self.language,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(&audio.data),
            },
        };

        let client = get_http_client().map_err(|err| SpeechError::Request(err.to_string()))?;

        let response = client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|err| SpeechError::Request(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SpeechError::Request(format!(
                "API error ({status}): {error_text}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| SpeechError::Request(err.to_string()))?;
        let parsed: RecognizeResponse = serde_json::from_str(&body)
            .map_err(|err| SpeechError::Request(format!("unparseable API response: {err}")))?;

        first_transcript(parsed).ok_or(SpeechError::Unintelligible)
    }
}
