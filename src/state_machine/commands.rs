//! Commands that can mutate session state.
//!
//! All state changes MUST go through the state machine's `apply()` method.
//! This is the only way to mutate state, ensuring a single source of truth.

use crate::domain::Meeting;
use crate::state::{Severity, View};
use serde::Serialize;
use serde_json::Value;

/// Commands that can mutate session state.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum StateCommand {
    // Dashboard actions
    /// Select a meeting for generation (validates the id exists)
    SelectMeeting { meeting_id: String },
    /// Prepend a user-created meeting and select it
    AddMeeting { meeting: Meeting },
    /// Set the channel the coordinator pulls context from
    SetContextChannel { channel: String },
    /// Set the channel the summary will be published to
    SetTargetChannel { channel: String },
    /// Switch the visible view; never discards data
    Navigate { view: View },

    // Generation lifecycle
    /// Begin a generation cycle (refused while one is in flight or without
    /// a selected meeting)
    StartGenerating { agent_id: String },
    /// Store the normalized result of a successful generation
    CompleteGeneration {
        raw: Option<Value>,
        /// Channel the request named; becomes the posting target
        channel: String,
    },
    /// Record a failed generation; the live summary is left untouched
    FailGeneration { message: String },
    /// Unconditional cleanup: clear the busy flag and active agent
    FinishGenerating,

    // Review edits
    /// Overwrite one scalar field of the live summary
    EditSummaryField { field: SummaryField, value: String },
    /// Overwrite one field of one action item
    EditActionItem {
        index: usize,
        field: ActionItemField,
        value: String,
    },
    /// Overwrite one key decision
    EditDecision { index: usize, value: String },
    /// Overwrite one insight
    EditInsight { index: usize, value: String },

    // Posting lifecycle
    /// Begin a post (refused while one is in flight, without a summary, or
    /// with an empty target channel)
    StartPosting { agent_id: String },
    /// Append the posted summary to history
    CompletePost {
        /// Timestamp reported by the publishing service, if any
        posted_at: Option<String>,
        /// Channel the service says it posted to, if any
        channel: Option<String>,
    },
    /// Record a failed post; nothing is appended
    FailPost { message: String },
    /// Unconditional cleanup: clear the busy flag and active agent
    FinishPosting,

    /// Append the live summary to history as a draft, synchronously
    SaveDraft,

    // Status messaging
    /// Show a status message (precondition violations use this directly)
    SetStatus { severity: Severity, text: String },
    /// Clear the status message if `seq` still names it
    ExpireStatus { seq: u64 },
}

/// Scalar fields of the live summary that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryField {
    MeetingTitle,
    MeetingDate,
    MeetingTime,
    Summary,
}

impl SummaryField {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryField::MeetingTitle => "meeting_title",
            SummaryField::MeetingDate => "meeting_date",
            SummaryField::MeetingTime => "meeting_time",
            SummaryField::Summary => "summary",
        }
    }
}

/// Fields of an action item that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionItemField {
    Task,
    Owner,
    Priority,
    Deadline,
}

impl ActionItemField {
    pub fn name(&self) -> &'static str {
        match self {
            ActionItemField::Task => "task",
            ActionItemField::Owner => "owner",
            ActionItemField::Priority => "priority",
            ActionItemField::Deadline => "deadline",
        }
    }
}
