//! Task CRUD endpoints.
//!
//! All routes are scoped by the optional `x-user-id` header: identified
//! callers see and touch only their own rows, anonymous callers the
//! unowned ones they created.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

use crate::db::{TaskRecord, TaskStore, UserStore};
use crate::error::ServerError;
use crate::middleware::identity::user_id_from_headers;
use crate::schemas::task::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, update_task, delete_task),
    components(schemas(CreateTaskRequest, UpdateTaskRequest, TaskResponse))
)]
pub struct TasksApi;

/// Register task routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "Tasks listed, newest first", body = [TaskResponse]),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<TaskResponse>>, ServerError> {
    let user_id = user_id_from_headers(&headers);
    let records = state.store.list_tasks(user_id.as_deref()).await?;
    Ok(Json(records.iter().map(|r| r.to_response()).collect()))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ServerError> {
    req.validate()?;

    let user_id = user_id_from_headers(&headers);
    if let Some(uid) = &user_id {
        state.store.upsert_user(uid).await?;
    }

    let now = Utc::now();
    let record = TaskRecord {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        status: req.status.unwrap_or_default().as_str().to_owned(),
        priority: req.priority.unwrap_or_default().as_str().to_owned(),
        due_date: req.due_date,
        user_id,
        voice_note_id: None,
        created_at: now,
        updated_at: now,
    };
    state.store.insert_task(record.clone()).await?;
    Ok((StatusCode::CREATED, Json(record.to_response())))
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "ID of the task to update")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ServerError> {
    req.validate()?;

    let user_id = user_id_from_headers(&headers);
    if let Some(uid) = &user_id {
        state.store.upsert_user(uid).await?;
    }

    let mut record = state
        .store
        .get_task(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("task {id} not found")))?;

    // An identified caller can only touch rows it owns.
    if let Some(uid) = &user_id {
        if record.user_id.as_deref() != Some(uid.as_str()) {
            return Err(ServerError::NotFound(format!("task {id} not found")));
        }
    }

    if let Some(title) = req.title {
        record.title = title;
    }
    if let Some(description) = req.description {
        record.description = Some(description);
    }
    if let Some(status) = req.status {
        record.status = status.as_str().to_owned();
    }
    if let Some(priority) = req.priority {
        record.priority = priority.as_str().to_owned();
    }
    if let Some(due_date) = req.due_date {
        record.due_date = Some(due_date);
    }
    record.updated_at = Utc::now();

    state.store.update_task(&record).await?;
    Ok(Json(record.to_response()))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "ID of the task to delete")
    ),
    responses(
        (status = 204, description = "Task deleted (or was already gone)"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    // Deleting an already-missing task still returns 204 so the frontend can
    // treat deletes as idempotent.
    state.store.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::test_state;
    use axum::http::HeaderValue;

    fn headers_for(user: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_str(user).unwrap());
        headers
    }

    fn create_body(json: &str) -> CreateTaskRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn create_defaults_status_and_priority() {
        let (state, _guard) = test_state().await;
        let (status, Json(task)) = create_task(
            State(state),
            HeaderMap::new(),
            Json(create_body(r#"{"title":"Write the report"}"#)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task.status, "PENDING");
        assert_eq!(task.priority, "MEDIUM");
        assert_eq!(task.due_date, None);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let (state, _guard) = test_state().await;
        let result = create_task(
            State(state),
            HeaderMap::new(),
            Json(create_body(r#"{"title":""}"#)),
        )
        .await;
        assert!(matches!(result, Err(ServerError::BadRequest(_))));
    }

    #[tokio::test]
    async fn list_is_scoped_by_the_user_header() {
        let (state, _guard) = test_state().await;
        create_task(
            State(Arc::clone(&state)),
            headers_for("browser-a"),
            Json(create_body(r#"{"title":"mine"}"#)),
        )
        .await
        .unwrap();
        create_task(
            State(Arc::clone(&state)),
            HeaderMap::new(),
            Json(create_body(r#"{"title":"anonymous"}"#)),
        )
        .await
        .unwrap();

        let Json(scoped) = list_tasks(State(Arc::clone(&state)), headers_for("browser-a"))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].title, "mine");

        let Json(all) = list_tasks(State(state), HeaderMap::new()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn update_moves_a_task_across_the_board() {
        let (state, _guard) = test_state().await;
        let (_, Json(created)) = create_task(
            State(Arc::clone(&state)),
            HeaderMap::new(),
            Json(create_body(r#"{"title":"Drag me"}"#)),
        )
        .await
        .unwrap();

        let patch: UpdateTaskRequest =
            serde_json::from_str(r#"{"status":"IN_PROGRESS","priority":"HIGH"}"#).unwrap();
        let Json(updated) = update_task(
            State(state),
            Path(created.id.clone()),
            HeaderMap::new(),
            Json(patch),
        )
        .await
        .unwrap();

        assert_eq!(updated.status, "IN_PROGRESS");
        assert_eq!(updated.priority, "HIGH");
        assert_eq!(updated.title, "Drag me");
    }

    #[tokio::test]
    async fn update_of_missing_task_is_404() {
        let (state, _guard) = test_state().await;
        let patch: UpdateTaskRequest = serde_json::from_str(r#"{"status":"DONE"}"#).unwrap();
        let result = update_task(
            State(state),
            Path("no-such-task".to_owned()),
            HeaderMap::new(),
            Json(patch),
        )
        .await;
        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_cannot_touch_another_users_task() {
        let (state, _guard) = test_state().await;
        let (_, Json(created)) = create_task(
            State(Arc::clone(&state)),
            headers_for("browser-a"),
            Json(create_body(r#"{"title":"theirs"}"#)),
        )
        .await
        .unwrap();

        let patch: UpdateTaskRequest = serde_json::from_str(r#"{"status":"DONE"}"#).unwrap();
        let result = update_task(
            State(state),
            Path(created.id),
            headers_for("browser-b"),
            Json(patch),
        )
        .await;
        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_returns_204_even_when_already_gone() {
        let (state, _guard) = test_state().await;
        let status = delete_task(State(state), Path("never-existed".to_owned()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
