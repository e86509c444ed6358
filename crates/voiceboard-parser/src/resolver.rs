//! Natural-language due-date extraction.
//!
//! [`DatePhraseResolver`] is the seam between the parser and whatever
//! understands phrases like "next Wednesday". The default implementation
//! wraps the `chrono-english` crate, which parses a date expression from the
//! start of a string; free-text scanning is layered on top by trying token
//! windows across the transcript.

use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Resolves the first date/time phrase in `text` against the `now` anchor.
///
/// Returns `None` when no phrase is found; the resolver must never invent a
/// placeholder instant.
pub trait DatePhraseResolver: Send + Sync {
    fn resolve(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// Longest phrase attempted, in whitespace tokens ("a week from next
/// tuesday" is five).
const MAX_PHRASE_TOKENS: usize = 5;

/// English-dialect resolver backed by `chrono-english`.
///
/// Scans left to right; at each start token the longest window is tried
/// first, so "tomorrow evening" wins over bare "tomorrow". The first start
/// position with any parseable window decides the result, so the earliest
/// phrase in the transcript always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDateResolver;

impl DatePhraseResolver for EnglishDateResolver {
    fn resolve(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
            .collect();

        for start in 0..tokens.len() {
            let end_max = (start + MAX_PHRASE_TOKENS).min(tokens.len());
            for end in (start + 1..=end_max).rev() {
                let candidate = tokens[start..end].join(" ").to_lowercase();
                if let Ok(resolved) = parse_date_string(&candidate, now, Dialect::Us) {
                    return Some(resolved);
                }
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
