//! Title derivation: the first sentence of the transcript, or a truncated
//! head of it when no sentence boundary exists.

/// Title used for empty or whitespace-only transcripts.
pub const FALLBACK_TITLE: &str = "New task from voice note";

/// Longest title the truncation branch ever produces, in characters.
pub const MAX_TITLE_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Derive a short task title from a raw transcript.
///
/// Evaluation order is load-bearing: empty check, then sentence boundary,
/// then length truncation, then passthrough. A terminator at position zero
/// counts as absent, so inputs like `".lorem…"` fall through to the length
/// rules. Counting is char-based; slicing never splits a UTF-8 boundary.
pub fn derive_title(transcript: &str) -> String {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        return FALLBACK_TITLE.to_owned();
    }

    if let Some((idx, mark)) = trimmed
        .char_indices()
        .find(|(_, c)| matches!(c, '.' | '!' | '?'))
    {
        if idx > 0 {
            return trimmed[..idx + mark.len_utf8()].to_owned();
        }
    }

    if trimmed.chars().count() > MAX_TITLE_CHARS {
        let head: String = trimmed.chars().take(MAX_TITLE_CHARS - ELLIPSIS.len()).collect();
        return format!("{head}{ELLIPSIS}");
    }

    trimmed.to_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
