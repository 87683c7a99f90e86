//! Read-only snapshot of session state for TUI display.
//!
//! The TUI never mutates this; it receives new snapshots via watch channel.

use crate::domain::{HistoryEntry, Meeting, SummaryData};
use crate::state::{SessionState, StatusMessage, View};

#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub view: View,
    pub meetings: Vec<Meeting>,
    pub selected_meeting: Option<String>,
    pub context_channel: String,
    pub target_channel: String,
    pub summary: Option<SummaryData>,
    /// Most recent first.
    pub history: Vec<HistoryEntry>,
    pub is_generating: bool,
    pub is_posting: bool,
    pub active_agent: Option<String>,
    pub status: Option<StatusMessage>,
    pub status_seq: u64,
}

impl StateSnapshot {
    pub fn selected_meeting(&self) -> Option<&Meeting> {
        let id = self.selected_meeting.as_deref()?;
        self.meetings.iter().find(|m| m.id == id)
    }

    /// True while either async operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_generating || self.is_posting
    }
}

impl From<&SessionState> for StateSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            view: state.view,
            meetings: state.meetings.clone(),
            selected_meeting: state.selected_meeting.clone(),
            context_channel: state.context_channel.clone(),
            target_channel: state.target_channel.clone(),
            summary: state.summary.clone(),
            history: state.history.all().to_vec(),
            is_generating: state.is_generating,
            is_posting: state.is_posting,
            active_agent: state.active_agent.clone(),
            status: state.status.clone(),
            status_seq: state.status_seq,
        }
    }
}
