//! Events emitted by the state machine after processing commands.
//!
//! These are for logging and notification purposes only - the TUI gets its
//! updates via the watch channel's StateSnapshot.

use crate::domain::EntryStatus;
use crate::state::{Severity, View};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum StateEvent {
    /// The visible view switched
    ViewChanged { from: View, to: View },
    /// A meeting was selected for generation
    MeetingSelected { meeting_id: String },
    /// A user-created meeting was added
    MeetingAdded { meeting_id: String },
    /// A generation request went out to the coordinator
    GenerationStarted { agent_id: String },
    /// A normalized summary was stored for review
    SummaryStored {
        action_items: usize,
        key_decisions: usize,
        insights: usize,
    },
    /// Generation failed; the message is what the user sees
    GenerationFailed { message: String },
    /// A publish request went out to the publisher
    PostingStarted { agent_id: String },
    /// A finalized summary was appended to history
    HistoryAppended {
        entry_id: String,
        status: EntryStatus,
        channel: String,
    },
    /// Posting failed; nothing was appended
    PostFailed { message: String },
    /// One field of the live summary was edited
    SummaryEdited { field: String },
    /// A busy flag was cleared (runs on success and failure alike)
    BusyCleared { action: String },
    /// A status message was shown
    StatusSet { severity: Severity, text: String },
    /// The status message expired without being replaced
    StatusExpired,
}
