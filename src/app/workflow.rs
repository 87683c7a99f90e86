//! The workflow orchestrator: ties user actions to gateway calls and state
//! machine commands.
//!
//! All failure paths end here. Gateway errors become status messages, never
//! propagated past the handler, and the busy-flag cleanup runs on success
//! and failure alike so a failed attempt can never leave the session stuck
//! in a busy state.

use crate::agents::prompt::{generation_prompt, publish_prompt};
use crate::agents::AgentGateway;
use crate::config::{AgentsConfig, DefaultsConfig};
use crate::domain::{has_text, Meeting};
use crate::state::{SessionState, Severity, View, STATUS_TTL};
use crate::state_machine::{
    ActionItemField, StateCommand, StateEvent, SummaryField, WorkflowStateMachine,
};
use crate::structured_logger::StructuredLogger;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Inputs processed by the workflow loop. The UI sends user actions;
/// `ExpireStatus` arrives from the delayed expiry task.
#[derive(Debug, Clone)]
pub enum Action {
    SelectMeeting(String),
    AddCustomMeeting(MeetingDraft),
    SetContextChannel(String),
    SetTargetChannel(String),
    Navigate(View),
    Generate,
    EditSummaryField {
        field: SummaryField,
        value: String,
    },
    EditActionItem {
        index: usize,
        field: ActionItemField,
        value: String,
    },
    EditDecision {
        index: usize,
        value: String,
    },
    EditInsight {
        index: usize,
        value: String,
    },
    Post,
    SaveDraft,
    ExpireStatus(u64),
}

/// Raw form data for a user-created meeting. Only the title is required;
/// everything else gets a sensible default.
#[derive(Debug, Clone, Default)]
pub struct MeetingDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    /// Comma-separated names.
    pub attendees: String,
    pub description: String,
    pub agenda: String,
    pub channel: String,
}

impl MeetingDraft {
    fn into_meeting(self, default_channel: &str) -> Meeting {
        let attendees = self
            .attendees
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Meeting {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            date: or_default(self.date, || {
                chrono::Local::now().format("%Y-%m-%d").to_string()
            }),
            time: or_default(self.time, || "12:00 PM".to_string()),
            duration: or_default(self.duration, || "1 hour".to_string()),
            attendees,
            description: self.description,
            agenda: self.agenda,
            channel: or_default(self.channel, || default_channel.to_string()),
        }
    }
}

fn or_default(value: String, fallback: impl FnOnce() -> String) -> String {
    if has_text(&value) {
        value
    } else {
        fallback()
    }
}

pub struct Workflow {
    machine: WorkflowStateMachine,
    gateway: Arc<dyn AgentGateway>,
    agents: AgentsConfig,
    defaults: DefaultsConfig,
    logger: Arc<StructuredLogger>,
    action_tx: mpsc::UnboundedSender<Action>,
    /// Pending status-expiry task; replaced (aborted) whenever a newer
    /// status message arrives.
    status_timer: Option<JoinHandle<()>>,
}

impl Workflow {
    pub fn new(
        machine: WorkflowStateMachine,
        gateway: Arc<dyn AgentGateway>,
        agents: AgentsConfig,
        defaults: DefaultsConfig,
        logger: Arc<StructuredLogger>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            machine,
            gateway,
            agents,
            defaults,
            logger,
            action_tx,
            status_timer: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    /// Dispatches one action. Errors mean a rejected command (an invariant
    /// violation), not a user-visible failure; user-visible failures are
    /// surfaced as status messages and return `Ok`.
    pub async fn handle(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SelectMeeting(meeting_id) => self.select_meeting(&meeting_id),
            Action::AddCustomMeeting(draft) => self.add_custom_meeting(draft),
            Action::SetContextChannel(channel) => self
                .apply(StateCommand::SetContextChannel { channel })
                .map(drop),
            Action::SetTargetChannel(channel) => self
                .apply(StateCommand::SetTargetChannel { channel })
                .map(drop),
            Action::Navigate(view) => self.apply(StateCommand::Navigate { view }).map(drop),
            Action::Generate => self.generate_summary().await,
            Action::EditSummaryField { field, value } => self.edit_summary_field(field, value),
            Action::EditActionItem {
                index,
                field,
                value,
            } => self
                .apply(StateCommand::EditActionItem {
                    index,
                    field,
                    value,
                })
                .map(drop),
            Action::EditDecision { index, value } => self
                .apply(StateCommand::EditDecision { index, value })
                .map(drop),
            Action::EditInsight { index, value } => self
                .apply(StateCommand::EditInsight { index, value })
                .map(drop),
            Action::Post => self.post_to_channel().await,
            Action::SaveDraft => self.save_draft(),
            Action::ExpireStatus(seq) => self.apply(StateCommand::ExpireStatus { seq }).map(drop),
        }
    }

    pub fn select_meeting(&mut self, meeting_id: &str) -> Result<()> {
        self.apply(StateCommand::SelectMeeting {
            meeting_id: meeting_id.to_string(),
        })?;
        Ok(())
    }

    pub fn add_custom_meeting(&mut self, draft: MeetingDraft) -> Result<()> {
        if !has_text(&draft.title) {
            self.apply(StateCommand::SetStatus {
                severity: Severity::Error,
                text: "Please enter a meeting title".to_string(),
            })?;
            return Ok(());
        }
        let meeting = draft.into_meeting(&self.defaults.channel);
        self.apply(StateCommand::AddMeeting { meeting })?;
        Ok(())
    }

    pub fn edit_summary_field(&mut self, field: SummaryField, value: String) -> Result<()> {
        self.apply(StateCommand::EditSummaryField { field, value })?;
        Ok(())
    }

    /// The full generation cycle: guard, request, normalize, store.
    pub async fn generate_summary(&mut self) -> Result<()> {
        // Reentrancy guard: a second trigger while one request is in
        // flight is dropped, not queued.
        if self.machine.state().is_generating {
            tracing::debug!("generate ignored: a request is already in flight");
            return Ok(());
        }
        let selected = self.machine.state().selected_meeting().cloned();
        let Some(meeting) = selected else {
            self.apply(StateCommand::SetStatus {
                severity: Severity::Error,
                text: "Select a meeting first".to_string(),
            })?;
            return Ok(());
        };
        let channel = self
            .machine
            .state()
            .generation_channel()
            .unwrap_or_else(|| meeting.channel.clone());

        let prompt = generation_prompt(&meeting, &channel);
        let agent_id = self.agents.coordinator.clone();
        self.apply(StateCommand::StartGenerating {
            agent_id: agent_id.clone(),
        })?;

        self.logger
            .log_agent_invocation(&agent_id, "generate", prompt.len());
        let outcome = self.gateway.invoke(&prompt, &agent_id).await;
        self.logger
            .log_agent_complete(&agent_id, matches!(&outcome, Ok(reply) if reply.success));

        let applied = match outcome {
            Ok(reply) if reply.success => self.apply(StateCommand::CompleteGeneration {
                raw: reply.into_result(),
                channel,
            }),
            Ok(reply) => self.apply(StateCommand::FailGeneration {
                message: reply
                    .error
                    .filter(|e| has_text(e))
                    .unwrap_or_else(|| "Failed to generate summary".to_string()),
            }),
            Err(err) => {
                tracing::warn!("generation request failed: {err:#}");
                self.apply(StateCommand::FailGeneration {
                    message: "An error occurred while generating the summary".to_string(),
                })
            }
        };
        // Cleanup runs no matter how the attempt ended.
        let cleanup = self.apply(StateCommand::FinishGenerating);
        applied?;
        cleanup?;
        Ok(())
    }

    /// The full posting cycle: guard, preconditions, request, append.
    pub async fn post_to_channel(&mut self) -> Result<()> {
        if self.machine.state().is_posting {
            tracing::debug!("post ignored: a request is already in flight");
            return Ok(());
        }
        let summary = self.machine.state().summary.clone();
        let Some(summary) = summary else {
            self.apply(StateCommand::SetStatus {
                severity: Severity::Error,
                text: "No summary to post".to_string(),
            })?;
            return Ok(());
        };
        let channel = self.machine.state().target_channel.clone();
        if !has_text(&channel) {
            self.apply(StateCommand::SetStatus {
                severity: Severity::Error,
                text: "Enter a target channel before posting".to_string(),
            })?;
            return Ok(());
        }

        let prompt = publish_prompt(&summary, &channel);
        let agent_id = self.agents.publisher.clone();
        self.apply(StateCommand::StartPosting {
            agent_id: agent_id.clone(),
        })?;

        self.logger
            .log_agent_invocation(&agent_id, "post", prompt.len());
        let outcome = self.gateway.invoke(&prompt, &agent_id).await;
        self.logger
            .log_agent_complete(&agent_id, matches!(&outcome, Ok(reply) if reply.success));

        let applied = match outcome {
            Ok(reply) if reply.success => {
                let result = reply.into_result();
                let posted_at = result
                    .as_ref()
                    .and_then(|v| v.get("posted_at"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                let resolved_channel = result
                    .as_ref()
                    .and_then(|v| v.get("channel"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                self.apply(StateCommand::CompletePost {
                    posted_at,
                    channel: resolved_channel,
                })
            }
            Ok(reply) => self.apply(StateCommand::FailPost {
                message: reply
                    .error
                    .filter(|e| has_text(e))
                    .unwrap_or_else(|| "Failed to post summary".to_string()),
            }),
            Err(err) => {
                tracing::warn!("post request failed: {err:#}");
                self.apply(StateCommand::FailPost {
                    message: "An error occurred while posting the summary".to_string(),
                })
            }
        };
        let cleanup = self.apply(StateCommand::FinishPosting);
        applied?;
        cleanup?;
        Ok(())
    }

    /// Appends the live summary to history as a draft. Synchronous: no
    /// gateway call, and an empty target channel is fine.
    pub fn save_draft(&mut self) -> Result<()> {
        if self.machine.state().summary.is_none() {
            self.apply(StateCommand::SetStatus {
                severity: Severity::Error,
                text: "No summary to save".to_string(),
            })?;
            return Ok(());
        }
        self.apply(StateCommand::SaveDraft)?;
        Ok(())
    }

    fn apply(&mut self, command: StateCommand) -> Result<Vec<StateEvent>> {
        let seq_before = self.machine.state().status_seq;
        let events = self.machine.apply(command)?;
        let seq_after = self.machine.state().status_seq;
        if seq_after != seq_before {
            self.arm_status_expiry(seq_after);
        }
        Ok(events)
    }

    /// Schedules the status message to clear after [`STATUS_TTL`], aborting
    /// any previously scheduled expiry. The machine ignores stale sequence
    /// numbers, so an aborted-but-already-fired task is harmless too.
    fn arm_status_expiry(&mut self, seq: u64) {
        if let Some(timer) = self.status_timer.take() {
            timer.abort();
        }
        let tx = self.action_tx.clone();
        self.status_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(STATUS_TTL).await;
            let _ = tx.send(Action::ExpireStatus(seq));
        }));
    }

    #[cfg(test)]
    pub(crate) fn machine_mut(&mut self) -> &mut WorkflowStateMachine {
        &mut self.machine
    }
}

/// Drives the workflow from the action channel until every sender is gone.
/// Rejected commands are logged and the loop keeps going.
pub async fn run_workflow_loop(
    mut workflow: Workflow,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
) {
    while let Some(action) = action_rx.recv().await {
        if let Err(err) = workflow.handle(action).await {
            tracing::warn!("workflow command rejected: {err:#}");
        }
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
