//! Mock implementations for unit testing.
//!
//! These mocks implement the `Transcriber` and `MemoStore` traits to enable
//! testing without a speech service or a live store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use crate::memo::{Memo, current_timestamp};
use crate::speech::{SpeechError, Transcriber};
use crate::store::{MemoStore, StoreError};

/// Mock transcriber returning a canned outcome.
///
/// Records the paths it was asked to transcribe so tests can check
/// temp-file lifecycles.
pub struct MockTranscriber {
    result: Result<String, SpeechError>,
    paths: Mutex<Vec<PathBuf>>,
}

impl MockTranscriber {
    /// Recognition succeeds with the given transcript.
    pub fn returning(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// The service cannot interpret the audio.
    pub fn unintelligible() -> Self {
        Self {
            result: Err(SpeechError::Unintelligible),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// The request itself fails.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(SpeechError::Request(message.to_string())),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// The most recent path passed to `transcribe`.
    pub fn last_path(&self) -> Option<PathBuf> {
        self.paths.lock().unwrap().last().cloned()
    }

    /// How many times `transcribe` was called.
    pub fn calls(&self) -> usize {
        self.paths.lock().unwrap().len()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError> {
        self.paths.lock().unwrap().push(audio_path.to_path_buf());
        self.result.clone()
    }
}

/// In-memory memo store with configurable connectedness and table state.
///
/// Write attempts are counted past the guards, so tests can assert that a
/// disconnected store never sees a call.
pub struct MemoryMemoStore {
    connected: bool,
    table_exists: bool,
    memos: Mutex<Vec<Memo>>,
    next_id: AtomicI64,
    insert_attempts: AtomicUsize,
}

impl MemoryMemoStore {
    pub fn connected() -> Self {
        Self {
            connected: true,
            table_exists: true,
            memos: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            insert_attempts: AtomicUsize::new(0),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
    }

    pub fn without_table() -> Self {
        Self {
            table_exists: false,
            ..Self::connected()
        }
    }

    /// Snapshot of the stored memos, in insertion order.
    pub fn memos(&self) -> Vec<Memo> {
        self.memos.lock().unwrap().clone()
    }

    /// Inserts that made it past the connection and table guards.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemoStore for MemoryMemoStore {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        if !self.connected {
            return Err(StoreError::NotConfigured);
        }
        if !self.table_exists {
            return Err(StoreError::TableMissing("voice_memos".to_string()));
        }
        Ok(())
    }

    async fn insert(&self, content: &str) -> Result<Memo, StoreError> {
        if !self.connected {
            return Err(StoreError::NotConfigured);
        }
        self.ensure_table().await?;
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);

        let memo = Memo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            content: content.to_string(),
            created_at: current_timestamp(),
        };
        self.memos.lock().unwrap().push(memo.clone());
        Ok(memo)
    }

    async fn list_all(&self) -> Result<Vec<Memo>, StoreError> {
        self.ensure_table().await?;

        let mut memos = self.memos.lock().unwrap().clone();
        // Newest first; id breaks ties within the same timestamp.
        memos.sort_by(|a, b| (&b.created_at, b.id).cmp(&(&a.created_at, a.id)));
        Ok(memos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_transcriber_records_paths() {
        let transcriber = MockTranscriber::returning("text");
        assert_eq!(transcriber.calls(), 0);
        assert!(transcriber.last_path().is_none());

        transcriber.transcribe(Path::new("/tmp/a.wav")).await.unwrap();
        assert_eq!(transcriber.calls(), 1);
        assert_eq!(transcriber.last_path(), Some(PathBuf::from("/tmp/a.wav")));
    }

    #[tokio::test]
    async fn memory_store_assigns_increasing_ids() {
        let store = MemoryMemoStore::connected();
        let first = store.insert("하나").await.unwrap();
        let second = store.insert("둘").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn memory_store_lists_newest_first() {
        let store = MemoryMemoStore::connected();
        store.insert("first").await.unwrap();
        store.insert("second").await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed[0].content, "second");
        assert_eq!(listed[1].content, "first");
    }

    #[tokio::test]
    async fn memory_store_guards_match_the_real_client() {
        assert!(matches!(
            MemoryMemoStore::disconnected().insert("x").await,
            Err(StoreError::NotConfigured)
        ));
        assert!(matches!(
            MemoryMemoStore::without_table().ensure_table().await,
            Err(StoreError::TableMissing(_))
        ));
    }
}
