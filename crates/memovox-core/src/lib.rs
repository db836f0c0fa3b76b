pub mod audio;
pub mod config;
pub mod http;
pub mod memo;
pub mod session;
pub mod speech;
pub mod store;
pub mod test_support;
pub mod workflow;

pub use config::{SpeechConfig, StoreConfig};
pub use memo::Memo;
pub use session::{Action, SessionState};
pub use speech::{GoogleSpeech, SpeechError, Transcriber, transcribe_or_fallback};
pub use store::{MemoStore, RestMemoStore, StoreError};
pub use workflow::{SaveOutcome, save_memo, transcribe_upload};
