//! The single session state container.
//!
//! All mutable session data lives here and is owned exclusively by the
//! workflow state machine; everything else sees read-only snapshots.

use crate::domain::{has_text, Meeting, SummaryData};
use crate::history::HistoryLedger;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a status message stays visible unless replaced sooner.
pub const STATUS_TTL: Duration = Duration::from_secs(6);

/// The screen currently shown. Generation and posting are not views of
/// their own: they are the two busy flags layered over whatever view is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Review,
    History,
    Settings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Review => "Summary Review",
            View::History => "Meeting History",
            View::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Single-slot transient notification. A newer message always replaces an
/// older one; expiry is handled by the orchestrator's delayed task and keyed
/// on [`SessionState::status_seq`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub view: View,
    pub meetings: Vec<Meeting>,
    /// Id of the meeting selected for generation, if any.
    pub selected_meeting: Option<String>,
    /// Channel the coordinator should pull conversation context from.
    /// Empty means "use the selected meeting's channel".
    pub context_channel: String,
    /// Channel the finished summary will be published to.
    pub target_channel: String,
    /// The live, editable summary of the current generation cycle.
    pub summary: Option<SummaryData>,
    pub history: HistoryLedger,
    pub is_generating: bool,
    pub is_posting: bool,
    /// Routing id of the agent currently in flight. Observability only.
    pub active_agent: Option<String>,
    pub status: Option<StatusMessage>,
    /// Monotonic counter bumped on every status change; stale expiry
    /// signals carry an older value and are ignored.
    pub status_seq: u64,
}

impl SessionState {
    pub fn new(meetings: Vec<Meeting>) -> Self {
        Self {
            view: View::Dashboard,
            meetings,
            selected_meeting: None,
            context_channel: String::new(),
            target_channel: String::new(),
            summary: None,
            history: HistoryLedger::new(),
            is_generating: false,
            is_posting: false,
            active_agent: None,
            status: None,
            status_seq: 0,
        }
    }

    pub fn selected_meeting(&self) -> Option<&Meeting> {
        let id = self.selected_meeting.as_deref()?;
        self.meetings.iter().find(|m| m.id == id)
    }

    /// The channel a generation request should name: the user's context
    /// override when set, otherwise the selected meeting's own channel.
    pub fn generation_channel(&self) -> Option<String> {
        let meeting = self.selected_meeting()?;
        if has_text(&self.context_channel) {
            Some(self.context_channel.clone())
        } else {
            Some(meeting.channel.clone())
        }
    }

    /// Replaces the status message and bumps the sequence counter.
    /// Returns the new sequence for expiry scheduling.
    pub fn set_status(&mut self, severity: Severity, text: impl Into<String>) -> u64 {
        self.status = Some(StatusMessage {
            severity,
            text: text.into(),
        });
        self.status_seq += 1;
        self.status_seq
    }

    /// Clears the status only if `seq` still names the current message.
    /// Returns whether anything was cleared.
    pub fn clear_status_if(&mut self, seq: u64) -> bool {
        if self.status.is_some() && self.status_seq == seq {
            self.status = None;
            true
        } else {
            false
        }
    }
}
