//! HTTP handlers: the UI controller.
//!
//! Every mutation is a POST that applies actions to the session and
//! redirects back to `/` (the re-render). Store and speech failures become
//! flash notices; only genuinely unexpected failures (temp-file IO,
//! malformed multipart) surface as error responses.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use memovox_core::Action;
use memovox_core::workflow::{self, SaveOutcome};

use crate::render::{self, MemoListing};
use crate::sessions::{Notice, SESSION_COOKIE};
use crate::state::AppState;

pub async fn health() -> &'static str {
    "OK"
}

/// GET /. Renders the page for this session.
pub async fn index(State(app): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (sid, minted) = app.sessions.resolve(&headers);
    let session = app.sessions.take_for_render(&sid);
    let listing = load_listing(&app).await;

    let page = render::page(&session, app.store_connected, &listing);
    with_session_cookie(Html(page).into_response(), &sid, minted)
}

/// POST /recording/start
pub async fn start_recording(State(app): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (sid, minted) = app.sessions.resolve(&headers);
    app.sessions.with_session(&sid, |session| {
        session.state = std::mem::take(&mut session.state).apply(Action::StartRecording);
    });
    redirect_home(&sid, minted)
}

/// POST /recording/stop. Stops without uploading.
pub async fn stop_recording(State(app): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (sid, minted) = app.sessions.resolve(&headers);
    app.sessions.with_session(&sid, |session| {
        session.state = std::mem::take(&mut session.state).apply(Action::StopRecording);
    });
    redirect_home(&sid, minted)
}

#[derive(Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub text: String,
}

/// POST /text. The editor overwrites the transcript; no confirm step.
pub async fn edit_text(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<EditForm>,
) -> Response {
    let (sid, minted) = app.sessions.resolve(&headers);
    app.sessions.with_session(&sid, |session| {
        session.state = std::mem::take(&mut session.state).apply(Action::Edit(form.text.clone()));
    });
    redirect_home(&sid, minted)
}

/// POST /upload. Accepts one `.wav` file while recording, runs the
/// transcription cycle, and stash the result (or its fallback text).
pub async fn upload(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let (sid, minted) = app.sessions.resolve(&headers);

    let recording = app.sessions.with_session(&sid, |session| session.state.recording);
    if !recording {
        // Stale form post after the flag already dropped; nothing to do.
        app.sessions.with_session(&sid, |session| {
            session.notice = Some(Notice::info("녹음 시작 후에 파일을 업로드해주세요."));
        });
        return Ok(redirect_home(&sid, minted));
    }

    let mut uploaded: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?
    {
        if field.name() == Some("audio") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
            uploaded = Some((filename, bytes.to_vec()));
        }
    }

    match uploaded {
        None => {
            app.sessions.with_session(&sid, |session| {
                session.notice = Some(Notice::error("업로드된 파일이 없습니다."));
            });
        }
        Some((filename, _)) if !filename.to_lowercase().ends_with(".wav") => {
            app.sessions.with_session(&sid, |session| {
                session.notice = Some(Notice::error("WAV 형식의 오디오 파일만 업로드할 수 있습니다."));
            });
        }
        Some((_, bytes)) => {
            let state = app.sessions.with_session(&sid, |session| session.state.clone());
            let next = workflow::transcribe_upload(state, &bytes, app.transcriber.as_ref())
                .await
                .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")))?;
            app.sessions.with_session(&sid, |session| session.state = next);
        }
    }

    Ok(redirect_home(&sid, minted))
}

/// POST /save. Persists the current text; success clears the editor,
/// failure keeps it untouched.
pub async fn save(State(app): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (sid, minted) = app.sessions.resolve(&headers);

    let state = app.sessions.with_session(&sid, |session| session.state.clone());
    let (next, outcome) = workflow::save_memo(state, app.store.as_ref()).await;

    let notice = match outcome {
        SaveOutcome::Saved => Notice::success("메모가 성공적으로 저장되었습니다!"),
        SaveOutcome::EmptyText => Notice::info("저장할 텍스트가 없습니다."),
        SaveOutcome::Failed(err) => Notice::error(render::store_error_message(
            &err,
            "Supabase 저장 중 오류 발생",
        )),
    };

    app.sessions.with_session(&sid, |session| {
        session.state = next;
        session.notice = Some(notice);
    });
    redirect_home(&sid, minted)
}

/// Pull the sidebar listing for one render. Connection status gates the
/// table probe; the probe gates the listing.
async fn load_listing(app: &AppState) -> MemoListing {
    if !app.store_connected {
        return MemoListing::Disconnected;
    }

    if let Err(err) = app.store.ensure_table().await {
        return MemoListing::Unavailable(render::store_error_message(&err, "메모 목록을 불러올 수 없습니다"));
    }

    match app.store.list_all().await {
        Ok(memos) => MemoListing::Loaded(memos),
        Err(err) => {
            tracing::warn!("memo listing failed: {err}");
            MemoListing::LoadError(render::store_error_message(&err, "메모 로드 중 오류 발생"))
        }
    }
}

fn redirect_home(sid: &str, minted: bool) -> Response {
    with_session_cookie(Redirect::to("/").into_response(), sid, minted)
}

/// Attach the session cookie to a response when the id was just minted.
fn with_session_cookie(mut response: Response, sid: &str, minted: bool) -> Response {
    if minted {
        let cookie = format!("{SESSION_COOKIE}={sid}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}
