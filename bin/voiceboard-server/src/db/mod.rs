//! Database abstraction layer.
//!
//! The store traits below define the persistence interface; the default
//! implementation is [`sqlite::SqliteStore`]. To swap to another database
//! (Postgres, MySQL, …), implement the traits for the new type and change
//! the concrete type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

pub mod sqlite;

use std::future::Future;

use chrono::{DateTime, Utc};

/// A row in the `tasks` table.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Wire-format status string (`"PENDING"` | `"IN_PROGRESS"` | `"DONE"`).
    pub status: String,
    /// Wire-format priority string (`"LOW"` … `"CRITICAL"`).
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    /// Per-browser owner id; `None` for anonymous tasks.
    pub user_id: Option<String>,
    /// Set when the task was created from a voice note.
    pub voice_note_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row in the `voice_notes` table.
#[derive(Debug, Clone)]
pub struct VoiceNoteRecord {
    pub id: String,
    pub audio_url: Option<String>,
    pub transcript: String,
    pub created_at: DateTime<Utc>,
}

/// Trait for persisting board tasks.
pub trait TaskStore: Send + Sync + 'static {
    fn insert_task(
        &self,
        record: TaskRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Newest first; scoped to `user_id` when given.
    fn list_tasks(
        &self,
        user_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<TaskRecord>, sqlx::Error>> + Send;

    fn get_task(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<TaskRecord>, sqlx::Error>> + Send;

    /// Persist every mutable field of `record`, matched by `record.id`.
    fn update_task(
        &self,
        record: &TaskRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Returns the number of rows removed; deleting a missing task is not an
    /// error.
    fn delete_task(&self, id: &str) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
}

/// Trait for persisting voice notes and the tasks seeded from them.
pub trait VoiceNoteStore: Send + Sync + 'static {
    /// Insert the voice note and its task atomically. When `task.user_id`
    /// is set the placeholder user row is upserted inside the same
    /// transaction so the foreign key can never dangle.
    fn create_task_from_voice(
        &self,
        note: VoiceNoteRecord,
        task: TaskRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn get_voice_note(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<VoiceNoteRecord>, sqlx::Error>> + Send;
}

/// Trait for the per-browser placeholder users.
pub trait UserStore: Send + Sync + 'static {
    /// Create the placeholder user row for `id` if it does not exist yet.
    fn upsert_user(&self, id: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}
