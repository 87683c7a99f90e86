//! Centralized state machine for the summary workflow.
//!
//! This module provides the ONLY place where state transitions happen.
//! The state machine owns the session state, validates commands, emits
//! events, and broadcasts snapshots to subscribers via a watch channel.

mod commands;
mod events;
mod snapshot;

pub use commands::{ActionItemField, StateCommand, SummaryField};
pub use events::StateEvent;
pub use snapshot::StateSnapshot;

use crate::domain::{has_text, EntryStatus, HistoryEntry};
use crate::normalize::normalize;
use crate::state::{SessionState, Severity, View};
use crate::structured_logger::StructuredLogger;
use anyhow::{bail, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// The ONLY place state transitions happen.
/// Owns the state, validates commands, emits events, broadcasts snapshots.
pub struct WorkflowStateMachine {
    state: SessionState,
    snapshot_tx: watch::Sender<StateSnapshot>,
    logger: Arc<StructuredLogger>,
    seq: u64,
}

impl WorkflowStateMachine {
    /// Creates a new state machine with the given initial state.
    ///
    /// Returns the machine and a watch receiver for state snapshots. The
    /// TUI should poll this receiver for updates.
    pub fn new(
        initial_state: SessionState,
        logger: Arc<StructuredLogger>,
    ) -> (Self, watch::Receiver<StateSnapshot>) {
        let snapshot = StateSnapshot::from(&initial_state);
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot);

        let machine = Self {
            state: initial_state,
            snapshot_tx,
            logger,
            seq: 0,
        };

        (machine, snapshot_rx)
    }

    /// All mutations go through this single method.
    /// Returns events for logging; broadcasts a snapshot automatically.
    pub fn apply(&mut self, command: StateCommand) -> Result<Vec<StateEvent>> {
        self.seq += 1;
        self.logger.log_command(self.seq, &command);

        let events = self.apply_internal(command)?;

        for event in &events {
            self.logger.log_event(self.seq, event);
        }

        let snapshot = StateSnapshot::from(&self.state);
        let _ = self.snapshot_tx.send(snapshot);

        Ok(events)
    }

    fn apply_internal(&mut self, command: StateCommand) -> Result<Vec<StateEvent>> {
        match command {
            StateCommand::SelectMeeting { meeting_id } => {
                if !self.state.meetings.iter().any(|m| m.id == meeting_id) {
                    bail!("Unknown meeting id: {}", meeting_id);
                }
                self.state.selected_meeting = Some(meeting_id.clone());
                Ok(vec![StateEvent::MeetingSelected { meeting_id }])
            }

            StateCommand::AddMeeting { meeting } => {
                let meeting_id = meeting.id.clone();
                self.state.meetings.insert(0, meeting);
                self.state.selected_meeting = Some(meeting_id.clone());
                let status = self.set_status(Severity::Success, "Meeting added successfully");
                Ok(vec![StateEvent::MeetingAdded { meeting_id }, status])
            }

            StateCommand::SetContextChannel { channel } => {
                self.state.context_channel = channel;
                Ok(vec![])
            }

            StateCommand::SetTargetChannel { channel } => {
                self.state.target_channel = channel;
                Ok(vec![])
            }

            StateCommand::Navigate { view } => {
                let from = self.state.view;
                if from == view {
                    return Ok(vec![]);
                }
                // A view switch never discards the live summary or any
                // other data; returning to review is always possible.
                self.state.view = view;
                Ok(vec![StateEvent::ViewChanged { from, to: view }])
            }

            StateCommand::StartGenerating { agent_id } => {
                if self.state.is_generating {
                    bail!("Generation already in flight");
                }
                if self.state.selected_meeting().is_none() {
                    bail!("Cannot generate without a selected meeting");
                }
                let from = self.state.view;
                self.state.is_generating = true;
                self.state.active_agent = Some(agent_id.clone());
                self.state.view = View::Review;

                let mut events = Vec::new();
                if from != View::Review {
                    events.push(StateEvent::ViewChanged {
                        from,
                        to: View::Review,
                    });
                }
                events.push(StateEvent::GenerationStarted { agent_id });
                events.push(self.set_status(Severity::Info, "Generating meeting summary..."));
                Ok(events)
            }

            StateCommand::CompleteGeneration { raw, channel } => {
                let Some(meeting) = self.state.selected_meeting().cloned() else {
                    bail!("Cannot store a summary without a selected meeting");
                };
                let summary = normalize(raw.as_ref(), &meeting);
                let stored = StateEvent::SummaryStored {
                    action_items: summary.action_items.len(),
                    key_decisions: summary.key_decisions.len(),
                    insights: summary.insights.len(),
                };
                self.state.summary = Some(summary);
                self.state.target_channel = channel;
                let status =
                    self.set_status(Severity::Success, "Summary generated successfully!");
                Ok(vec![stored, status])
            }

            StateCommand::FailGeneration { message } => {
                // Fail in place: the view stays on review so the user can
                // step back and retry; the live summary is untouched.
                let status = self.set_status(Severity::Error, &message);
                Ok(vec![StateEvent::GenerationFailed { message }, status])
            }

            StateCommand::FinishGenerating => {
                self.state.is_generating = false;
                self.state.active_agent = None;
                Ok(vec![StateEvent::BusyCleared {
                    action: "generate".to_string(),
                }])
            }

            StateCommand::EditSummaryField { field, value } => {
                let Some(summary) = self.state.summary.as_mut() else {
                    return Ok(vec![]);
                };
                match field {
                    SummaryField::MeetingTitle => summary.meeting_title = value,
                    SummaryField::MeetingDate => summary.meeting_date = value,
                    SummaryField::MeetingTime => summary.meeting_time = value,
                    SummaryField::Summary => summary.summary = value,
                }
                Ok(vec![StateEvent::SummaryEdited {
                    field: field.name().to_string(),
                }])
            }

            StateCommand::EditActionItem {
                index,
                field,
                value,
            } => {
                let Some(item) = self
                    .state
                    .summary
                    .as_mut()
                    .and_then(|s| s.action_items.get_mut(index))
                else {
                    return Ok(vec![]);
                };
                match field {
                    ActionItemField::Task => item.task = value,
                    ActionItemField::Owner => item.owner = value,
                    ActionItemField::Priority => item.priority = value,
                    ActionItemField::Deadline => item.deadline = value,
                }
                Ok(vec![StateEvent::SummaryEdited {
                    field: format!("action_items[{}].{}", index, field.name()),
                }])
            }

            StateCommand::EditDecision { index, value } => {
                let Some(decision) = self
                    .state
                    .summary
                    .as_mut()
                    .and_then(|s| s.key_decisions.get_mut(index))
                else {
                    return Ok(vec![]);
                };
                *decision = value;
                Ok(vec![StateEvent::SummaryEdited {
                    field: format!("key_decisions[{}]", index),
                }])
            }

            StateCommand::EditInsight { index, value } => {
                let Some(insight) = self
                    .state
                    .summary
                    .as_mut()
                    .and_then(|s| s.insights.get_mut(index))
                else {
                    return Ok(vec![]);
                };
                *insight = value;
                Ok(vec![StateEvent::SummaryEdited {
                    field: format!("insights[{}]", index),
                }])
            }

            StateCommand::StartPosting { agent_id } => {
                if self.state.is_posting {
                    bail!("Posting already in flight");
                }
                if self.state.summary.is_none() {
                    bail!("No summary to post");
                }
                if !has_text(&self.state.target_channel) {
                    bail!("Target channel is empty");
                }
                self.state.is_posting = true;
                self.state.active_agent = Some(agent_id.clone());
                let text = format!("Posting summary to {}...", self.state.target_channel);
                let status = self.set_status(Severity::Info, &text);
                Ok(vec![StateEvent::PostingStarted { agent_id }, status])
            }

            StateCommand::CompletePost { posted_at, channel } => {
                let Some(summary) = self.state.summary.clone() else {
                    bail!("No summary to post");
                };
                let entry = HistoryEntry {
                    id: Uuid::new_v4().to_string(),
                    summary,
                    status: EntryStatus::Posted,
                    target_channel: self.state.target_channel.clone(),
                    posted_at: posted_at
                        .filter(|t| has_text(t))
                        .unwrap_or_else(|| Utc::now().to_rfc3339()),
                };
                let appended = StateEvent::HistoryAppended {
                    entry_id: entry.id.clone(),
                    status: EntryStatus::Posted,
                    channel: entry.target_channel.clone(),
                };
                self.state.history.append(entry);

                // The service may resolve the channel (e.g. to its display
                // name); prefer its answer for the notification.
                let resolved = channel
                    .filter(|c| has_text(c))
                    .unwrap_or_else(|| self.state.target_channel.clone());
                let text = format!("Summary posted to {} successfully!", resolved);
                let status = self.set_status(Severity::Success, &text);
                Ok(vec![appended, status])
            }

            StateCommand::FailPost { message } => {
                // No history append; the target channel and summary are
                // preserved so the user can resubmit without re-entry.
                let status = self.set_status(Severity::Error, &message);
                Ok(vec![StateEvent::PostFailed { message }, status])
            }

            StateCommand::FinishPosting => {
                self.state.is_posting = false;
                self.state.active_agent = None;
                Ok(vec![StateEvent::BusyCleared {
                    action: "post".to_string(),
                }])
            }

            StateCommand::SaveDraft => {
                let Some(summary) = self.state.summary.clone() else {
                    bail!("No summary to save");
                };
                let entry = HistoryEntry {
                    id: Uuid::new_v4().to_string(),
                    summary,
                    status: EntryStatus::Draft,
                    target_channel: self.state.target_channel.clone(),
                    posted_at: Utc::now().to_rfc3339(),
                };
                let appended = StateEvent::HistoryAppended {
                    entry_id: entry.id.clone(),
                    status: EntryStatus::Draft,
                    channel: entry.target_channel.clone(),
                };
                self.state.history.append(entry);
                let status = self.set_status(Severity::Success, "Draft saved to history");
                Ok(vec![appended, status])
            }

            StateCommand::SetStatus { severity, text } => {
                let status = self.set_status(severity, &text);
                Ok(vec![status])
            }

            StateCommand::ExpireStatus { seq } => {
                if self.state.clear_status_if(seq) {
                    Ok(vec![StateEvent::StatusExpired])
                } else {
                    Ok(vec![])
                }
            }
        }
    }

    fn set_status(&mut self, severity: Severity, text: &str) -> StateEvent {
        self.state.set_status(severity, text);
        StateEvent::StatusSet {
            severity,
            text: text.to_string(),
        }
    }

    /// Returns an immutable reference to the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }
}
