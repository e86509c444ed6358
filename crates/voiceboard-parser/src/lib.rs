//! Transcript parsing for voiceboard.
//!
//! Maps a free-form spoken sentence to a structured task draft: a short
//! title, a priority/status classification, and an optional due date pulled
//! from natural-language phrases like "by next Wednesday".
//!
//! The parser is a pure function of `(transcript, now)`: no I/O, no ambient
//! clock, safe to call concurrently. Every input produces a fully populated
//! draft; a missing signal resolves to a default, never to an error.

mod resolver;
mod rules;
mod title;

pub use resolver::{DatePhraseResolver, EnglishDateResolver};
pub use rules::{ParseEnumError, Priority, Status};
pub use title::{derive_title, FALLBACK_TITLE, MAX_TITLE_CHARS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured, unsaved output of parsing a transcript.
///
/// Field names serialize in camelCase (`dueDate`, `rawTranscript`) to match
/// the wire contract of the task API; an absent due date serializes as
/// `null`, never as a placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDraft {
    pub title: String,
    /// The original transcript, verbatim.
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<DateTime<Utc>>,
    /// The original input, preserved unmodified.
    pub raw_transcript: String,
}

/// Rule-based transcript parser with a pluggable date-phrase resolver.
///
/// The resolver is the one capability boundary: tests inject a stub via
/// [`TranscriptParser::with_resolver`], production uses
/// [`EnglishDateResolver`].
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser<R = EnglishDateResolver> {
    resolver: R,
}

impl TranscriptParser<EnglishDateResolver> {
    pub fn new() -> Self {
        Self {
            resolver: EnglishDateResolver,
        }
    }
}

impl<R: DatePhraseResolver> TranscriptParser<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Parse `transcript` into a draft, resolving relative date phrases
    /// against `now`.
    pub fn parse(&self, transcript: &str, now: DateTime<Utc>) -> ParsedDraft {
        ParsedDraft {
            title: title::derive_title(transcript),
            description: transcript.to_owned(),
            priority: rules::classify_priority(transcript),
            status: rules::classify_status(transcript),
            due_date: self.resolver.resolve(transcript, now),
            raw_transcript: transcript.to_owned(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
