//! Integration tests: the upload and save workflows driven end-to-end
//! through the trait mocks, with no network and no real speech service.

use memovox_core::session::{Action, SessionState};
use memovox_core::speech::CANNOT_RECOGNIZE;
use memovox_core::store::MemoStore;
use memovox_core::test_support::mocks::{MemoryMemoStore, MockTranscriber};
use memovox_core::workflow::{SaveOutcome, save_memo, transcribe_upload};

/// Credentials unset: saving fails, nothing is stored, and the text stays
/// in the editor for another attempt.
#[tokio::test]
async fn disconnected_store_rejects_save_and_keeps_text() {
    let store = MemoryMemoStore::disconnected();
    let state = SessionState::default().apply(Action::Edit("hello".to_string()));

    let (state, outcome) = save_memo(state, &store).await;

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert_eq!(state.text, "hello");
    assert_eq!(store.insert_attempts(), 0, "no store call may be made");
}

/// Clear speech: the transcript lands in the session and recording ends.
#[tokio::test]
async fn clear_upload_yields_transcript_and_ends_recording() {
    let transcriber = MockTranscriber::returning("안녕하세요 음성 메모입니다");
    let state = SessionState::default().apply(Action::StartRecording);

    let state = transcribe_upload(state, b"fake wav payload", &transcriber)
        .await
        .unwrap();

    assert_eq!(state.text, "안녕하세요 음성 메모입니다");
    assert_ne!(state.text, CANNOT_RECOGNIZE);
    assert!(!state.recording);
    assert!(state.audio_file.is_none());
}

/// Saving "테스트 메모" succeeds, resets the editor, and the memo leads the
/// next listing.
#[tokio::test]
async fn saved_memo_leads_the_next_listing() {
    let store = MemoryMemoStore::connected();
    store.insert("이전 메모").await.unwrap();

    let state = SessionState::default().apply(Action::Edit("테스트 메모".to_string()));
    let (state, outcome) = save_memo(state, &store).await;

    assert!(matches!(outcome, SaveOutcome::Saved));
    assert_eq!(state.text, "");

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed[0].content, "테스트 메모");
    assert_eq!(listed[1].content, "이전 메모");
}

/// An unintelligible upload stores exactly the fallback sentence, and the
/// temp file is gone from disk afterward.
#[tokio::test]
async fn unintelligible_upload_leaves_sentinel_and_no_temp_file() {
    let transcriber = MockTranscriber::unintelligible();
    let state = SessionState::default().apply(Action::StartRecording);

    let state = transcribe_upload(state, b"static noise", &transcriber)
        .await
        .unwrap();

    assert_eq!(state.text, CANNOT_RECOGNIZE);
    assert!(state.audio_file.is_none());

    let temp_path = transcriber.last_path().expect("transcriber was invoked");
    assert!(temp_path.to_string_lossy().ends_with(".wav"));
    assert!(!temp_path.exists(), "temp file must not outlive the upload cycle");
}

/// Round-trip property: content survives verbatim and timestamps are
/// monotonically ordered, newest first.
#[tokio::test]
async fn listing_orders_by_created_at_descending() {
    let store = MemoryMemoStore::connected();
    for content in ["첫째", "둘째", "셋째"] {
        store.insert(content).await.unwrap();
    }

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].content, "셋째");
    assert_eq!(listed[2].content, "첫째");
    for pair in listed.windows(2) {
        assert!(
            (&pair[0].created_at, pair[0].id) >= (&pair[1].created_at, pair[1].id),
            "listing must be newest first"
        );
    }
}

/// Repeated uploads each get their own temp file and each file is cleaned
/// up, so repeated use leaks nothing.
#[tokio::test]
async fn repeated_uploads_do_not_accumulate_temp_files() {
    let transcriber = MockTranscriber::returning("반복 업로드");
    let mut state = SessionState::default();

    for _ in 0..3 {
        state = state.apply(Action::StartRecording);
        state = transcribe_upload(state, b"bytes", &transcriber).await.unwrap();
        let path = transcriber.last_path().unwrap();
        assert!(!path.exists());
    }
    assert_eq!(transcriber.calls(), 3);
}
