//! Ordered classification rule tables for priority and status.
//!
//! Each table is explicit `(pattern, value)` data evaluated top to bottom
//! with first-match-wins, so tier precedence is auditable in one place
//! rather than buried in nested conditionals. Patterns are case-insensitive
//! and word-boundary anchored: "below" must not trigger the LOW tier.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task urgency. Wire form is the screaming-snake string (`"LOW"` … `"CRITICAL"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Task progress state. Wire form: `"PENDING"`, `"IN_PROGRESS"`, `"DONE"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Done,
}

/// A stored enum string did not match any known wire value.
#[derive(Debug, Clone, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "CRITICAL" => Ok(Priority::Critical),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_owned(),
            }),
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Status::Pending),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_owned(),
            }),
        }
    }
}

// ── Rule tables ───────────────────────────────────────────────────────────────

/// Priority tiers, most urgent first. A transcript matching several tiers
/// resolves to the first (most urgent) one.
static PRIORITY_RULES: LazyLock<Vec<(Regex, Priority)>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(critical|severe|blocker|production issue|prod issue)\b",
            Priority::Critical,
        ),
        (
            r"(?i)\b(urgent|high priority|top priority|very important|asap|immediately)\b",
            Priority::High,
        ),
        (
            r"(?i)\b(low priority|low|nice to have|whenever)\b",
            Priority::Low,
        ),
        (
            r"(?i)\b(medium priority|normal|standard)\b",
            Priority::Medium,
        ),
    ]
    .into_iter()
    .map(|(pattern, value)| (compile(pattern), value))
    .collect()
});

/// Status checks. DONE is evaluated before IN_PROGRESS: transcripts mixing
/// completion and progress words ("was finished while working on it") must
/// land on DONE.
static STATUS_RULES: LazyLock<Vec<(Regex, Status)>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(done|completed|finish(?:ed)?|closed|resolved)\b",
            Status::Done,
        ),
        (
            r"(?i)\b(in progress|doing|working|started|ongoing|currently working)\b",
            Status::InProgress,
        ),
    ]
    .into_iter()
    .map(|(pattern, value)| (compile(pattern), value))
    .collect()
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rule pattern compiles")
}

/// Classify transcript urgency; no tier match defaults to [`Priority::Medium`].
pub fn classify_priority(transcript: &str) -> Priority {
    PRIORITY_RULES
        .iter()
        .find(|(re, _)| re.is_match(transcript))
        .map(|(_, value)| *value)
        .unwrap_or_default()
}

/// Classify transcript progress; no match defaults to [`Status::Pending`].
pub fn classify_status(transcript: &str) -> Status {
    STATUS_RULES
        .iter()
        .find(|(re, _)| re.is_match(transcript))
        .map(|(_, value)| *value)
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_priority_tier_matches_its_keywords() {
        assert_eq!(classify_priority("there is a blocker in prod"), Priority::Critical);
        assert_eq!(classify_priority("production issue in checkout"), Priority::Critical);
        assert_eq!(classify_priority("this is urgent"), Priority::High);
        assert_eq!(classify_priority("please do it asap"), Priority::High);
        assert_eq!(classify_priority("nice to have, whenever"), Priority::Low);
        assert_eq!(classify_priority("standard cleanup work"), Priority::Medium);
    }

    #[test]
    fn no_tier_match_defaults_to_medium() {
        assert_eq!(classify_priority("Update the README sometime next week"), Priority::Medium);
        assert_eq!(classify_priority(""), Priority::Medium);
    }

    #[test]
    fn critical_tier_wins_over_low() {
        assert_eq!(
            classify_priority("severe outage, but honestly nice to have"),
            Priority::Critical
        );
    }

    #[test]
    fn critical_tier_wins_over_high() {
        assert_eq!(classify_priority("urgent and critical"), Priority::Critical);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_priority("URGENT: fix the build"), Priority::High);
        assert_eq!(classify_status("Done with the review"), Status::Done);
    }

    #[test]
    fn substrings_inside_words_do_not_match() {
        // "Follow" contains "low", "lower" starts with it.
        assert_eq!(classify_priority("Follow up and lower the volume"), Priority::Medium);
        // "abandoned" contains "done".
        assert_eq!(classify_status("The plan was abandoned"), Status::Pending);
    }

    #[test]
    fn done_is_checked_before_in_progress() {
        assert_eq!(
            classify_status("The migration was finished while I was working on it"),
            Status::Done
        );
    }

    #[test]
    fn progress_phrasings_map_to_in_progress() {
        assert_eq!(classify_status("currently working on the onboarding flow"), Status::InProgress);
        assert_eq!(classify_status("started the refactor yesterday"), Status::InProgress);
        assert_eq!(classify_status("it is in progress"), Status::InProgress);
    }

    #[test]
    fn no_status_match_defaults_to_pending() {
        assert_eq!(classify_status("Book the flights"), Status::Pending);
    }

    #[test]
    fn wire_strings_round_trip() {
        for p in [Priority::Low, Priority::Medium, Priority::High, Priority::Critical] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        for s in [Status::Pending, Status::InProgress, Status::Done] {
            assert_eq!(s.as_str().parse::<Status>().unwrap(), s);
        }
        assert!("URGENT".parse::<Priority>().is_err());
        assert!("pending".parse::<Status>().is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!(serde_json::from_str::<Priority>("\"LOW\"").unwrap(), Priority::Low);
    }
}
