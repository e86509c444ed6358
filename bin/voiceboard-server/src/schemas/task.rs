use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use voiceboard_parser::{Priority, Status};

use crate::db::TaskRecord;

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "PENDING")]
    pub status: Option<Status>,
    #[schema(value_type = Option<String>, example = "MEDIUM")]
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Body of `PATCH /api/tasks/{id}`; every field optional.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "IN_PROGRESS")]
    pub status: Option<Status>,
    #[schema(value_type = Option<String>, example = "HIGH")]
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// A task on the wire: RFC 3339 timestamps, wire-format enum strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskRecord {
    pub fn to_response(&self) -> TaskResponse {
        TaskResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date.map(|d| d.to_rfc3339()),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
