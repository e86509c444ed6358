//! SQLite implementation of the store traits.
//!
//! Uses [`sqlx`] with the `sqlite` feature. Migrations are run automatically
//! on startup via [`SqliteStore::connect`].
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path **at compile time**
//! relative to `CARGO_MANIFEST_DIR` (the crate root), so the directory is
//! embedded into the binary. The database file location is determined at
//! runtime by the `VOICEBOARD_DATABASE_URL` environment variable and is
//! **not** related to the current working directory at runtime.
//!
//! # Queries
//!
//! The `sqlx::query` (runtime-verified) form is used deliberately so that no
//! `DATABASE_URL` environment variable is needed at compile time.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::warn;
use voiceboard_parser::{Priority, Status};

use super::{TaskRecord, TaskStore, UserStore, VoiceNoteRecord, VoiceNoteStore};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, user_id, \
                            voice_note_id, created_at, updated_at";

const INSERT_TASK: &str = "INSERT INTO tasks (id, title, description, status, priority, due_date, \
                           user_id, voice_note_id, created_at, updated_at) \
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const UPSERT_USER: &str = "INSERT INTO users (id, email, created_at) VALUES (?1, ?2, ?3) \
                           ON CONFLICT(id) DO NOTHING";

/// SQLite-backed task / voice-note store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations. `url` is a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://voiceboard.db"`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ── Row hydration ─────────────────────────────────────────────────────────────

type TaskRow = (
    String,
    String,
    Option<String>,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

fn parse_timestamp(raw: &str, column: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        warn!(raw = %raw, column = %column, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}

/// Unknown stored enum strings fall back to the default wire value instead
/// of failing the request.
fn normalize_status(raw: String) -> String {
    match raw.parse::<Status>() {
        Ok(_) => raw,
        Err(e) => {
            warn!(error = %e, "unknown stored status; defaulting");
            Status::default().as_str().to_owned()
        }
    }
}

fn normalize_priority(raw: String) -> String {
    match raw.parse::<Priority>() {
        Ok(_) => raw,
        Err(e) => {
            warn!(error = %e, "unknown stored priority; defaulting");
            Priority::default().as_str().to_owned()
        }
    }
}

fn task_from_row(row: TaskRow) -> TaskRecord {
    let (id, title, description, status, priority, due_date, user_id, voice_note_id, created_at, updated_at) =
        row;
    TaskRecord {
        id,
        title,
        description,
        status: normalize_status(status),
        priority: normalize_priority(priority),
        due_date: due_date.and_then(|raw| match raw.parse() {
            Ok(dt) => Some(dt),
            Err(e) => {
                warn!(raw = %raw, error = %e, "failed to parse stored due_date; dropping it");
                None
            }
        }),
        user_id,
        voice_note_id,
        created_at: parse_timestamp(&created_at, "created_at"),
        updated_at: parse_timestamp(&updated_at, "updated_at"),
    }
}

fn bind_task_insert<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    record: &'q TaskRecord,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.status)
        .bind(&record.priority)
        .bind(record.due_date.map(|d| d.to_rfc3339()))
        .bind(&record.user_id)
        .bind(&record.voice_note_id)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
}

// ── TaskStore ─────────────────────────────────────────────────────────────────

impl TaskStore for SqliteStore {
    async fn insert_task(&self, record: TaskRecord) -> Result<(), sqlx::Error> {
        bind_task_insert(sqlx::query(INSERT_TASK), &record)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_tasks(&self, user_id: Option<&str>) -> Result<Vec<TaskRecord>, sqlx::Error> {
        let rows: Vec<TaskRow> = if let Some(uid) = user_id {
            sqlx::query_as(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY created_at DESC"
            ))
            .bind(uid)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.into_iter().map(task_from_row).collect())
    }

    async fn get_task(&self, id: &str) -> Result<Option<TaskRecord>, sqlx::Error> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(task_from_row))
    }

    async fn update_task(&self, record: &TaskRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tasks SET title = ?1, description = ?2, status = ?3, priority = ?4, \
             due_date = ?5, updated_at = ?6 WHERE id = ?7",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.status)
        .bind(&record.priority)
        .bind(record.due_date.map(|d| d.to_rfc3339()))
        .bind(record.updated_at.to_rfc3339())
        .bind(&record.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ── VoiceNoteStore ────────────────────────────────────────────────────────────

impl VoiceNoteStore for SqliteStore {
    async fn create_task_from_voice(
        &self,
        note: VoiceNoteRecord,
        task: TaskRecord,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if let Some(uid) = &task.user_id {
            sqlx::query(UPSERT_USER)
                .bind(uid)
                .bind(format!("{uid}@local"))
                .bind(Utc::now().to_rfc3339())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "INSERT INTO voice_notes (id, audio_url, transcript, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&note.id)
        .bind(&note.audio_url)
        .bind(&note.transcript)
        .bind(note.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        bind_task_insert(sqlx::query(INSERT_TASK), &task)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_voice_note(&self, id: &str) -> Result<Option<VoiceNoteRecord>, sqlx::Error> {
        let row: Option<(String, Option<String>, String, String)> = sqlx::query_as(
            "SELECT id, audio_url, transcript, created_at FROM voice_notes WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, audio_url, transcript, created_at)| VoiceNoteRecord {
            id,
            audio_url,
            transcript,
            created_at: parse_timestamp(&created_at, "created_at"),
        }))
    }
}

// ── UserStore ─────────────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
    async fn upsert_user(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(UPSERT_USER)
            .bind(id)
            .bind(format!("{id}@local"))
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::test_state;
    use chrono::Duration;

    fn task(id: &str, title: &str, user_id: Option<&str>, created_at: DateTime<Utc>) -> TaskRecord {
        TaskRecord {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            status: "PENDING".to_owned(),
            priority: "MEDIUM".to_owned(),
            due_date: None,
            user_id: user_id.map(str::to_owned),
            voice_note_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn insert_get_round_trip() {
        let (state, _guard) = test_state().await;
        let now = Utc::now();
        let mut record = task("t1", "Write the report", None, now);
        record.due_date = Some(now + Duration::days(2));
        state.store.insert_task(record.clone()).await.unwrap();

        let fetched = state.store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(fetched.title, "Write the report");
        assert_eq!(
            fetched.due_date.map(|d| d.timestamp()),
            record.due_date.map(|d| d.timestamp())
        );
        assert!(state.store.get_task("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_user_scoped() {
        let (state, _guard) = test_state().await;
        let now = Utc::now();
        state.store.upsert_user("browser-a").await.unwrap();

        state
            .store
            .insert_task(task("t-old", "older", Some("browser-a"), now - Duration::minutes(5)))
            .await
            .unwrap();
        state
            .store
            .insert_task(task("t-new", "newer", Some("browser-a"), now))
            .await
            .unwrap();
        state
            .store
            .insert_task(task("t-anon", "anonymous", None, now))
            .await
            .unwrap();

        let scoped = state.store.list_tasks(Some("browser-a")).await.unwrap();
        assert_eq!(
            scoped.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["t-new", "t-old"]
        );

        let all = state.store.list_tasks(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn update_persists_mutable_fields() {
        let (state, _guard) = test_state().await;
        let now = Utc::now();
        state.store.insert_task(task("t1", "before", None, now)).await.unwrap();

        let mut record = state.store.get_task("t1").await.unwrap().unwrap();
        record.title = "after".to_owned();
        record.status = "DONE".to_owned();
        record.priority = "HIGH".to_owned();
        record.updated_at = now + Duration::seconds(30);
        state.store.update_task(&record).await.unwrap();

        let fetched = state.store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.status, "DONE");
        assert_eq!(fetched.priority, "HIGH");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (state, _guard) = test_state().await;
        state
            .store
            .insert_task(task("t1", "to delete", None, Utc::now()))
            .await
            .unwrap();

        assert_eq!(state.store.delete_task("t1").await.unwrap(), 1);
        assert_eq!(state.store.delete_task("t1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn voice_transaction_creates_note_task_and_user() {
        let (state, _guard) = test_state().await;
        let now = Utc::now();
        let note = VoiceNoteRecord {
            id: "vn1".to_owned(),
            audio_url: Some("https://cdn.example.com/a.webm".to_owned()),
            transcript: "Call Alice about the project.".to_owned(),
            created_at: now,
        };
        let mut record = task("t1", "Call Alice about the project.", Some("browser-b"), now);
        record.voice_note_id = Some("vn1".to_owned());
        record.description = Some(note.transcript.clone());

        state
            .store
            .create_task_from_voice(note, record)
            .await
            .unwrap();

        let stored_note = state.store.get_voice_note("vn1").await.unwrap().unwrap();
        assert_eq!(stored_note.transcript, "Call Alice about the project.");

        let stored_task = state.store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(stored_task.voice_note_id.as_deref(), Some("vn1"));
        assert_eq!(stored_task.user_id.as_deref(), Some("browser-b"));
    }

    #[tokio::test]
    async fn unknown_stored_enum_strings_hydrate_to_defaults() {
        let (state, _guard) = test_state().await;
        let mut record = task("t1", "odd row", None, Utc::now());
        record.status = "WEIRD".to_owned();
        record.priority = "SHINY".to_owned();
        state.store.insert_task(record).await.unwrap();

        let fetched = state.store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(fetched.status, "PENDING");
        assert_eq!(fetched.priority, "MEDIUM");
    }

    #[tokio::test]
    async fn upsert_user_twice_is_a_no_op() {
        let (state, _guard) = test_state().await;
        state.store.upsert_user("browser-c").await.unwrap();
        state.store.upsert_user("browser-c").await.unwrap();
    }
}
