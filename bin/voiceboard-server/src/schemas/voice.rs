use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use voiceboard_parser::ParsedDraft;

use crate::db::VoiceNoteRecord;
use crate::schemas::task::TaskResponse;

/// Body of both voice-note endpoints.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceNoteRequest {
    #[validate(length(min = 1, message = "transcript is required"))]
    pub transcript: String,
    #[validate(url(message = "audioUrl must be a valid URL"))]
    pub audio_url: Option<String>,
}

/// A stored voice note on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceNoteResponse {
    pub id: String,
    pub audio_url: Option<String>,
    pub transcript: String,
    pub created_at: String,
}

impl VoiceNoteRecord {
    pub fn to_response(&self) -> VoiceNoteResponse {
        VoiceNoteResponse {
            id: self.id.clone(),
            audio_url: self.audio_url.clone(),
            transcript: self.transcript.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Response of `POST /api/voice-notes`: the stored note and its task.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceNoteResponse {
    pub voice_note: VoiceNoteResponse,
    pub task: TaskResponse,
}

/// The parsed draft on the wire; `dueDate` stays `null` when no date phrase
/// was detected.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDraftResponse {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub due_date: Option<String>,
    pub raw_transcript: String,
}

impl VoiceDraftResponse {
    pub fn from_draft(draft: &ParsedDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority.as_str().to_owned(),
            status: draft.status.as_str().to_owned(),
            due_date: draft.due_date.map(|d| d.to_rfc3339()),
            raw_transcript: draft.raw_transcript.clone(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn request_accepts_camel_case_audio_url() {
        let req: CreateVoiceNoteRequest = serde_json::from_str(
            r#"{"transcript":"Book the flights","audioUrl":"https://cdn.example.com/a.webm"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.audio_url.as_deref(), Some("https://cdn.example.com/a.webm"));
    }

    #[test]
    fn empty_transcript_fails_validation() {
        let req: CreateVoiceNoteRequest = serde_json::from_str(r#"{"transcript":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn malformed_audio_url_fails_validation() {
        let req: CreateVoiceNoteRequest = serde_json::from_str(
            r#"{"transcript":"Book the flights","audioUrl":"not a url"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
