//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use voiceboard_parser::TranscriptParser;

use crate::config::Config;
use crate::db::sqlite::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Persistent task / voice-note store.
    pub store: Arc<SqliteStore>,
    /// Transcript parser, constructed once so the date resolver is a single
    /// injection point.
    pub parser: TranscriptParser,
}
