//! Server-rendered HTML for the single-page UI.
//!
//! Pure string building: handlers gather the session snapshot and the
//! sidebar listing, everything here just formats them. All user-originated
//! text goes through `html_escape`.

use memovox_core::Memo;
use memovox_core::store::StoreError;

use crate::sessions::{Notice, NoticeKind, Session};

/// Sidebar listing outcome for one render.
#[derive(Debug)]
pub enum MemoListing {
    /// Store not configured; no listing is attempted.
    Disconnected,
    /// The table probe failed; the listing was not attempted.
    Unavailable(String),
    Loaded(Vec<Memo>),
    /// `list_all` failed; rendered distinctly from an empty listing.
    LoadError(String),
}

/// Korean user-facing message for a store failure.
pub fn store_error_message(err: &StoreError, context: &str) -> String {
    match err {
        StoreError::NotConfigured => {
            "Supabase 연결 정보가 올바르게 설정되지 않았습니다. .env 파일을 확인해주세요.".to_string()
        }
        StoreError::TableMissing(table) => format!(
            "Supabase에 '{table}' 테이블이 없습니다. Supabase 대시보드에서 테이블을 생성해주세요."
        ),
        other => format!("{context}: {other}"),
    }
}

/// Render the whole page for one session.
pub fn page(session: &Session, connected: bool, listing: &MemoListing) -> String {
    let state = &session.state;

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>음성 메모 앱</title>
<style>
  body {{ font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }}
  main {{ flex: 1; padding: 2rem; max-width: 46rem; }}
  aside {{ width: 20rem; padding: 1.5rem; background: #f5f5f5; border-left: 1px solid #ddd; }}
  .controls {{ display: flex; gap: 1rem; margin-bottom: 1rem; }}
  .notice-success {{ background: #e6f4ea; border: 1px solid #34a853; padding: 0.75rem; }}
  .notice-error {{ background: #fce8e6; border: 1px solid #ea4335; padding: 0.75rem; }}
  .notice-info {{ background: #e8f0fe; border: 1px solid #4285f4; padding: 0.75rem; }}
  .warning {{ background: #fef7e0; border: 1px solid #fbbc04; padding: 0.75rem; margin-bottom: 0.75rem; }}
  .status-ok {{ color: #188038; }}
  .status-bad {{ color: #c5221f; }}
  textarea {{ width: 100%; height: 9rem; }}
  details {{ margin-bottom: 0.5rem; background: #fff; border: 1px solid #ddd; padding: 0.5rem; }}
  .memo-date {{ color: #666; font-size: 0.85rem; }}
</style>
</head>
<body>
<main>
<h1>🎤 음성 메모 앱</h1>
{notice}{controls}{recording}{transcript}</main>
<aside>
{sidebar}</aside>
</body>
</html>
"#,
        notice = notice_html(session.notice.as_ref()),
        controls = controls_html(state),
        recording = recording_html(state),
        transcript = transcript_html(state),
        sidebar = sidebar_html(connected, listing),
    )
}

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        None => String::new(),
        Some(notice) => {
            let class = match notice.kind {
                NoticeKind::Success => "notice-success",
                NoticeKind::Error => "notice-error",
                NoticeKind::Info => "notice-info",
            };
            format!(
                "<div class=\"{class}\">{}</div>\n",
                html_escape(&notice.message)
            )
        }
    }
}

/// The two-column control row: record toggle, and save when there is text.
fn controls_html(state: &memovox_core::SessionState) -> String {
    let record_button = if state.recording {
        r#"<form method="post" action="/recording/stop"><button type="submit">녹음 중지</button></form>"#
    } else {
        r#"<form method="post" action="/recording/start"><button type="submit">녹음 시작</button></form>"#
    };

    let save_button = if state.can_save() {
        r#"<form method="post" action="/save"><button type="submit">텍스트 저장</button></form>"#
    } else {
        ""
    };

    format!("<div class=\"controls\">{record_button}{save_button}</div>\n")
}

/// Recording banner and the upload form, shown only while recording.
fn recording_html(state: &memovox_core::SessionState) -> String {
    if !state.recording {
        return String::new();
    }

    concat!(
        "<div class=\"warning\">녹음 중... 녹음된 오디오 파일을 업로드해주세요.</div>\n",
        "<div class=\"notice-info\">이 앱은 마이크에 직접 접근하지 않습니다. ",
        "녹음된 .wav 파일을 업로드하면 텍스트로 변환됩니다.</div>\n",
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n",
        "<p><input type=\"file\" name=\"audio\" accept=\".wav\" required>\n",
        "<button type=\"submit\">업로드</button></p>\n",
        "</form>\n",
    )
    .to_string()
}

/// Transcript display plus the edit form, shown only when there is text.
fn transcript_html(state: &memovox_core::SessionState) -> String {
    if state.text.is_empty() {
        return String::new();
    }

    let text = html_escape(&state.text);
    format!(
        concat!(
            "<h2>변환된 텍스트:</h2>\n",
            "<p>{text}</p>\n",
            "<form method=\"post\" action=\"/text\">\n",
            "<label for=\"text\">텍스트 편집:</label>\n",
            "<textarea id=\"text\" name=\"text\">{text}</textarea>\n",
            "<p><button type=\"submit\">적용</button></p>\n",
            "</form>\n",
        ),
        text = text
    )
}

fn sidebar_html(connected: bool, listing: &MemoListing) -> String {
    let mut html = String::from("<h2>연결 상태</h2>\n");

    if connected {
        html.push_str("<p class=\"status-ok\">Supabase 연결됨</p>\n");
    } else {
        html.push_str("<p class=\"status-bad\">Supabase 연결 안됨</p>\n");
        html.push_str(
            "<p>.env 파일에 STORE_URL과 STORE_KEY를 설정해주세요.</p>\n",
        );
        return html;
    }

    html.push_str("<h2>저장된 메모</h2>\n");
    match listing {
        MemoListing::Disconnected => {}
        MemoListing::Unavailable(message) => {
            html.push_str(&format!(
                "<div class=\"warning\">{}</div>\n",
                html_escape(message)
            ));
        }
        MemoListing::LoadError(message) => {
            html.push_str(&format!(
                "<p class=\"status-bad\">{}</p>\n",
                html_escape(message)
            ));
        }
        MemoListing::Loaded(memos) if memos.is_empty() => {
            html.push_str("<p>저장된 메모가 없습니다.</p>\n");
        }
        MemoListing::Loaded(memos) => {
            for memo in memos {
                html.push_str(&format!(
                    concat!(
                        "<details><summary>메모 {id}</summary>\n",
                        "<p>{content}</p>\n",
                        "<p class=\"memo-date\">작성일: {date}</p>\n",
                        "</details>\n",
                    ),
                    id = memo.id,
                    content = html_escape(&memo.content),
                    date = html_escape(&memo.created_at_display()),
                ));
            }
        }
    }

    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use memovox_core::{Action, SessionState};

    fn session_with(state: SessionState) -> Session {
        Session {
            state,
            notice: None,
        }
    }

    fn memo(id: i64, content: &str, created_at: &str) -> Memo {
        Memo {
            id,
            content: content.to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn disconnected_sidebar_shows_status_and_hint() {
        let page = page(
            &Session::default(),
            false,
            &MemoListing::Disconnected,
        );
        assert!(page.contains("Supabase 연결 안됨"));
        assert!(page.contains("STORE_URL"));
        assert!(!page.contains("저장된 메모"));
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        let page = page(&Session::default(), true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("Supabase 연결됨"));
        assert!(page.contains("저장된 메모가 없습니다."));
    }

    #[test]
    fn load_error_is_distinct_from_empty() {
        let page = page(
            &Session::default(),
            true,
            &MemoListing::LoadError("메모 로드 중 오류 발생: timeout".to_string()),
        );
        assert!(page.contains("메모 로드 중 오류 발생"));
        assert!(!page.contains("저장된 메모가 없습니다."));
    }

    #[test]
    fn memos_render_with_truncated_timestamps() {
        let listing = MemoListing::Loaded(vec![memo(
            7,
            "회의 내용",
            "2026-08-06T14:03:21.123456",
        )]);
        let page = page(&Session::default(), true, &listing);
        assert!(page.contains("메모 7"));
        assert!(page.contains("회의 내용"));
        assert!(page.contains("작성일: 2026-08-06 14:03"));
        assert!(!page.contains("14:03:21"));
    }

    #[test]
    fn memo_content_is_escaped() {
        let listing =
            MemoListing::Loaded(vec![memo(1, "<script>alert(1)</script>", "2026-08-06T09:00")]);
        let page = page(&Session::default(), true, &listing);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn idle_state_offers_start_button_only() {
        let page = page(&Session::default(), true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("녹음 시작"));
        assert!(!page.contains("녹음 중지"));
        assert!(!page.contains("accept=\".wav\""));
        assert!(!page.contains("텍스트 저장"));
    }

    #[test]
    fn recording_state_offers_upload_form() {
        let state = SessionState::default().apply(Action::StartRecording);
        let page = page(&session_with(state), true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("녹음 중지"));
        assert!(page.contains("accept=\".wav\""));
        assert!(page.contains("action=\"/upload\""));
    }

    #[test]
    fn transcript_enables_editor_and_save() {
        let state = SessionState::default().apply(Action::Edit("변환 결과".to_string()));
        let page = page(&session_with(state), true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("변환된 텍스트:"));
        assert!(page.contains(">변환 결과</textarea>"));
        assert!(page.contains("텍스트 저장"));
    }

    #[test]
    fn transcript_text_is_escaped_in_the_editor() {
        let state = SessionState::default().apply(Action::Edit("a < b & c".to_string()));
        let page = page(&session_with(state), true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn notice_renders_once_with_its_kind() {
        let session = Session {
            state: SessionState::default(),
            notice: Some(crate::sessions::Notice::success("메모가 성공적으로 저장되었습니다!")),
        };
        let page = page(&session, true, &MemoListing::Loaded(vec![]));
        assert!(page.contains("notice-success"));
        assert!(page.contains("메모가 성공적으로 저장되었습니다!"));
    }

    #[test]
    fn table_warning_replaces_listing() {
        let page = page(
            &Session::default(),
            true,
            &MemoListing::Unavailable(
                "Supabase에 'voice_memos' 테이블이 없습니다.".to_string(),
            ),
        );
        assert!(page.contains("voice_memos"));
        assert!(!page.contains("저장된 메모가 없습니다."));
    }

    #[test]
    fn store_error_messages_localize_known_cases() {
        let message = store_error_message(&StoreError::NotConfigured, "저장 중 오류");
        assert!(message.contains(".env"));

        let message =
            store_error_message(&StoreError::TableMissing("voice_memos".to_string()), "저장 중 오류");
        assert!(message.contains("voice_memos"));

        let message = store_error_message(
            &StoreError::Http("timeout".to_string()),
            "Supabase 저장 중 오류 발생",
        );
        assert!(message.starts_with("Supabase 저장 중 오류 발생"));
        assert!(message.contains("timeout"));
    }

    #[test]
    fn escape_handles_all_specials() {
        assert_eq!(
            html_escape(r#"<a href="x">&"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;"
        );
    }
}
