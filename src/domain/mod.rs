//! Core data types shared by every other module: meetings, summaries,
//! action items, and finalized history entries.
//!
//! Everything here is plain data plus two pure predicates. No side effects,
//! no failure modes beyond file loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A meeting as supplied by the calendar side or created by the user.
///
/// Immutable once selected for generation; the custom-meeting path only ever
/// creates new instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    /// ISO date, e.g. "2026-02-20".
    pub date: String,
    /// Display time, e.g. "10:00 AM".
    pub time: String,
    pub duration: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// May contain light structured markup (numbered lines, bullets).
    #[serde(default)]
    pub agenda: String,
    /// Channel the summary is expected to land in by default.
    pub channel: String,
}

impl Meeting {
    /// Bundled sample meetings, used when no meetings file is configured.
    pub fn samples() -> Vec<Meeting> {
        const SAMPLE_MEETINGS_YAML: &str = include_str!("../../meetings.yaml");

        serde_yaml::from_str(SAMPLE_MEETINGS_YAML)
            .expect("Failed to parse embedded meetings.yaml - this is a bug in the meetings.yaml file")
    }
}

/// Loads a meeting list from a YAML file.
pub fn load_meetings(path: &Path) -> Result<Vec<Meeting>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read meetings file: {}", path.display()))?;
    let meetings: Vec<Meeting> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse meetings file as YAML: {}", path.display()))?;
    Ok(meetings)
}

/// Canonical priorities, in the order the review editor cycles them.
/// Free text is tolerated everywhere a priority is stored or displayed.
pub const PRIORITIES: [&str; 3] = ["High", "Medium", "Low"];

/// A single action item inside a summary. All fields are free text; the
/// normalizer guarantees they are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub owner: String,
    pub priority: String,
    pub deadline: String,
}

/// The editable summary produced by one generation cycle.
///
/// Invariant: every sequence field is a well-formed sequence and every
/// scalar field a string - never absent. The normalizer enforces this for
/// anything coming from the reasoning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    pub meeting_title: String,
    pub meeting_date: String,
    pub meeting_time: String,
    pub attendees: Vec<String>,
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub key_decisions: Vec<String>,
    pub insights: Vec<String>,
}

impl SummaryData {
    /// The all-fallback shape: header fields copied from the meeting,
    /// everything else empty.
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            meeting_title: meeting.title.clone(),
            meeting_date: meeting.date.clone(),
            meeting_time: meeting.time.clone(),
            attendees: meeting.attendees.clone(),
            summary: String::new(),
            action_items: Vec::new(),
            key_decisions: Vec::new(),
            insights: Vec::new(),
        }
    }
}

/// Disposition of a finalized summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Posted,
    Draft,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Posted => "Posted",
            EntryStatus::Draft => "Draft",
        }
    }
}

/// An immutable record of a finalized (posted or drafted) summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(flatten)]
    pub summary: SummaryData,
    pub status: EntryStatus,
    pub target_channel: String,
    /// RFC 3339 timestamp. May come from the publishing service, so it is
    /// not guaranteed monotonic.
    pub posted_at: String,
}

/// True if `s` has visible content.
pub fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

/// True if `items` is a non-empty sequence.
pub fn has_items<T>(items: &[T]) -> bool {
    !items.is_empty()
}
