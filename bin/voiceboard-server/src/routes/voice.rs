//! Voice-note endpoints: speech-to-task capture.
//!
//! `POST /api/voice-notes/parse` runs the full transcript parser and returns
//! the draft without persisting anything; the frontend shows it in a review
//! dialog. `POST /api/voice-notes` persists a voice note plus a task seeded
//! from it. Only the title is derived on the create path — the transcript
//! becomes the description verbatim and status/priority stay at their
//! defaults; edited drafts are saved through the regular task endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;
use voiceboard_parser::{derive_title, Priority, Status};

use crate::db::{TaskRecord, VoiceNoteRecord, VoiceNoteStore};
use crate::error::ServerError;
use crate::middleware::identity::user_id_from_headers;
use crate::schemas::voice::{
    CreateVoiceNoteRequest, CreateVoiceNoteResponse, VoiceDraftResponse, VoiceNoteResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_voice_note, parse_voice_note),
    components(schemas(
        CreateVoiceNoteRequest,
        CreateVoiceNoteResponse,
        VoiceNoteResponse,
        VoiceDraftResponse
    ))
)]
pub struct VoiceApi;

/// Register voice-note routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voice-notes", post(create_voice_note))
        .route("/voice-notes/parse", post(parse_voice_note))
}

#[utoipa::path(
    post,
    path = "/api/voice-notes/parse",
    tag = "voice",
    request_body = CreateVoiceNoteRequest,
    responses(
        (status = 200, description = "Draft parsed from the transcript", body = VoiceDraftResponse),
        (status = 400, description = "Bad request"),
    )
)]
pub async fn parse_voice_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVoiceNoteRequest>,
) -> Result<Json<VoiceDraftResponse>, ServerError> {
    req.validate()?;
    let draft = state.parser.parse(&req.transcript, Utc::now());
    Ok(Json(VoiceDraftResponse::from_draft(&draft)))
}

#[utoipa::path(
    post,
    path = "/api/voice-notes",
    tag = "voice",
    request_body = CreateVoiceNoteRequest,
    responses(
        (status = 201, description = "Voice note and task created", body = CreateVoiceNoteResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn create_voice_note(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateVoiceNoteRequest>,
) -> Result<(StatusCode, Json<CreateVoiceNoteResponse>), ServerError> {
    req.validate()?;

    let user_id = user_id_from_headers(&headers);
    let now = Utc::now();

    let note = VoiceNoteRecord {
        id: Uuid::new_v4().to_string(),
        audio_url: req.audio_url,
        transcript: req.transcript.clone(),
        created_at: now,
    };
    let task = TaskRecord {
        id: Uuid::new_v4().to_string(),
        title: derive_title(&req.transcript),
        description: Some(req.transcript),
        status: Status::default().as_str().to_owned(),
        priority: Priority::default().as_str().to_owned(),
        due_date: None,
        user_id,
        voice_note_id: Some(note.id.clone()),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_task_from_voice(note.clone(), task.clone())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateVoiceNoteResponse {
            voice_note: note.to_response(),
            task: task.to_response(),
        }),
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
