//! Environment-provided configuration.
//!
//! All configuration comes from environment variables (a `.env` file is
//! loaded by the binary before these are read). There is no CLI surface and
//! no settings file.

use std::env;

/// Environment variable holding the memo store base URL.
pub const STORE_URL_ENV: &str = "STORE_URL";
/// Environment variable holding the memo store access key.
pub const STORE_KEY_ENV: &str = "STORE_KEY";
/// Environment variable holding the speech API key.
pub const SPEECH_API_KEY_ENV: &str = "SPEECH_API_KEY";

/// Placeholder values shipped in the example `.env`; treated as unset.
const STORE_URL_PLACEHOLDER: &str = "your_store_url";
const STORE_KEY_PLACEHOLDER: &str = "your_store_key";

/// The speech service is pinned to Korean.
pub const SPEECH_LANGUAGE: &str = "ko-KR";

/// Connection settings for the remote memo store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }

    /// Read `STORE_URL` / `STORE_KEY` from the environment. Missing
    /// variables become empty strings and fail `is_configured`.
    pub fn from_env() -> Self {
        Self {
            url: env::var(STORE_URL_ENV).unwrap_or_default(),
            key: env::var(STORE_KEY_ENV).unwrap_or_default(),
        }
    }

    /// True iff both values are present and not the documented placeholders.
    ///
    /// This is the whole connection check: it involves no network and is
    /// evaluated once at startup, when the store client is constructed.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
            && !self.key.is_empty()
            && self.url != STORE_URL_PLACEHOLDER
            && self.key != STORE_KEY_PLACEHOLDER
    }
}

/// Settings for the speech-recognition service.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// API key for the speech service. An empty key is allowed; requests
    /// will fail and surface as the request-error fallback text.
    pub api_key: String,
    /// BCP-47 language code sent with every request.
    pub language: String,
}

impl SpeechConfig {
    /// Read `SPEECH_API_KEY` from the environment; the language is always
    /// Korean.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(SPEECH_API_KEY_ENV).unwrap_or_default(),
            language: SPEECH_LANGUAGE.to_string(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: SPEECH_LANGUAGE.to_string(),
        }
    }
}
