//! Shared helpers for handler and store tests.

use std::sync::Arc;

use voiceboard_parser::TranscriptParser;

use crate::config::Config;
use crate::db::sqlite::SqliteStore;
use crate::state::AppState;

/// Build an [`AppState`] over a throwaway SQLite file.
///
/// The returned `TempDir` guard must stay alive for the duration of the
/// test; dropping it removes the database file.
pub async fn test_state() -> (Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let store = SqliteStore::connect(&url).await.expect("connect test db");
    let state = Arc::new(AppState {
        config: Arc::new(Config::from_env()),
        store: Arc::new(store),
        parser: TranscriptParser::new(),
    });
    (state, dir)
}
