//! Tests for the workflow orchestrator, driven through the public action
//! surface with a scripted gateway.

use super::*;
use crate::agents::AgentReply;
use crate::domain::EntryStatus;
use crate::state_machine::StateSnapshot;
use anyhow::anyhow;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

#[derive(Default)]
struct MockGateway {
    replies: Mutex<VecDeque<Result<AgentReply>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGateway {
    fn push_json(&self, value: serde_json::Value) {
        let reply: AgentReply = serde_json::from_value(value).expect("valid reply json");
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    fn push_transport_error(&self) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(anyhow!("connection reset")));
    }

    /// `(agent_id, prompt)` pairs in invocation order.
    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AgentGateway for MockGateway {
    async fn invoke(&self, prompt: &str, agent_id: &str) -> Result<AgentReply> {
        self.calls
            .lock()
            .unwrap()
            .push((agent_id.to_string(), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentReply::default()))
    }
}

struct TestContext {
    workflow: Workflow,
    snapshot_rx: watch::Receiver<StateSnapshot>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    gateway: Arc<MockGateway>,
    _temp: TempDir,
}

fn create_test_workflow() -> TestContext {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        StructuredLogger::new("test-session", temp.path()).expect("Failed to create logger"),
    );
    let (machine, snapshot_rx) =
        WorkflowStateMachine::new(SessionState::new(Meeting::samples()), Arc::clone(&logger));
    let gateway = Arc::new(MockGateway::default());
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let workflow = Workflow::new(
        machine,
        gateway.clone(),
        AgentsConfig::default(),
        DefaultsConfig::default(),
        logger,
        action_tx,
    );
    TestContext {
        workflow,
        snapshot_rx,
        action_rx,
        gateway,
        _temp: temp,
    }
}

/// Selects the first sample meeting and runs one successful generation.
async fn generate(ctx: &mut TestContext) {
    ctx.workflow
        .handle(Action::SelectMeeting("1".to_string()))
        .await
        .expect("select");
    ctx.workflow
        .handle(Action::SetContextChannel("#eng".to_string()))
        .await
        .expect("set channel");
    ctx.gateway.push_json(json!({
        "success": true,
        "response": {"result": {"summary": "ok", "action_items": [{"task": "x"}]}},
    }));
    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("generate");
}

#[tokio::test]
async fn test_generate_end_to_end() {
    let mut ctx = create_test_workflow();
    generate(&mut ctx).await;

    let calls = ctx.gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, AgentsConfig::default().coordinator);
    assert!(calls[0].1.contains("Title: Sprint Planning - Q1 2026"));
    assert!(calls[0].1.contains("Channel for context: #eng"));

    let state = ctx.workflow.state();
    let summary = state.summary.as_ref().expect("summary stored");
    // Header fields fall back to the meeting; the single action item gets
    // per-field fallbacks.
    assert_eq!(summary.meeting_title, "Sprint Planning - Q1 2026");
    assert_eq!(summary.summary, "ok");
    assert_eq!(summary.action_items.len(), 1);
    assert_eq!(summary.action_items[0].task, "x");
    assert_eq!(summary.action_items[0].owner, "Unassigned");
    assert_eq!(summary.action_items[0].priority, "Medium");
    assert_eq!(summary.action_items[0].deadline, "TBD");

    assert_eq!(state.target_channel, "#eng");
    assert!(!state.is_generating);
    assert!(state.active_agent.is_none());
    assert_eq!(
        state.status.as_ref().map(|s| s.severity),
        Some(Severity::Success)
    );

    let snapshot = ctx.snapshot_rx.borrow();
    assert!(snapshot.summary.is_some());
    assert!(!snapshot.is_busy());
}

#[tokio::test]
async fn test_generation_failure_reports_gateway_error() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::SelectMeeting("1".to_string()))
        .await
        .expect("select");
    ctx.gateway
        .push_json(json!({"success": false, "error": "boom"}));
    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("generate");

    let state = ctx.workflow.state();
    let status = state.status.as_ref().expect("status set");
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(status.text, "boom");
    assert!(!state.is_generating);
    assert!(state.summary.is_none());
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn test_generation_failure_without_text_uses_fallback() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::SelectMeeting("1".to_string()))
        .await
        .expect("select");
    ctx.gateway.push_json(json!({"success": false}));
    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("generate");

    let status = ctx.workflow.state().status.as_ref().expect("status set");
    assert_eq!(status.text, "Failed to generate summary");
}

#[tokio::test]
async fn test_generation_transport_error_uses_generic_message() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::SelectMeeting("1".to_string()))
        .await
        .expect("select");
    ctx.gateway.push_transport_error();
    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("generate");

    let state = ctx.workflow.state();
    let status = state.status.as_ref().expect("status set");
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(status.text, "An error occurred while generating the summary");
    assert!(!state.is_generating);
}

#[tokio::test]
async fn test_busy_guard_refuses_second_generate() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::SelectMeeting("1".to_string()))
        .await
        .expect("select");

    // Simulate an in-flight generation.
    ctx.workflow
        .machine_mut()
        .apply(StateCommand::StartGenerating {
            agent_id: "coordinator".to_string(),
        })
        .expect("start");

    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("refused generate still returns Ok");

    // No gateway call was issued and the flag is untouched.
    assert!(ctx.gateway.calls().is_empty());
    assert!(ctx.workflow.state().is_generating);
}

#[tokio::test]
async fn test_generate_without_selection_is_rejected_synchronously() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::Generate)
        .await
        .expect("generate");

    let status = ctx.workflow.state().status.as_ref().expect("status set");
    assert_eq!(status.severity, Severity::Error);
    assert!(ctx.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_post_end_to_end() {
    let mut ctx = create_test_workflow();
    generate(&mut ctx).await;

    ctx.gateway.push_json(json!({
        "success": true,
        "response": {"result": {
            "posted_at": "2026-02-20T10:45:00Z",
            "channel": "#engineering",
        }},
    }));
    ctx.workflow.handle(Action::Post).await.expect("post");

    let calls = ctx.gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, AgentsConfig::default().publisher);
    assert!(calls[1].1.contains("to channel \"#eng\""));
    assert!(calls[1].1.contains("- x | Owner: Unassigned | Priority: Medium | Deadline: TBD"));

    let state = ctx.workflow.state();
    assert_eq!(state.history.len(), 1);
    let entry = &state.history.all()[0];
    assert_eq!(entry.status, EntryStatus::Posted);
    assert_eq!(entry.target_channel, "#eng");
    assert_eq!(entry.posted_at, "2026-02-20T10:45:00Z");

    let status = state.status.as_ref().expect("status set");
    assert_eq!(status.severity, Severity::Success);
    assert!(status.text.contains("#engineering"));
    assert!(!state.is_posting);
}

#[tokio::test]
async fn test_post_requires_target_channel() {
    let mut ctx = create_test_workflow();
    generate(&mut ctx).await;
    ctx.workflow
        .handle(Action::SetTargetChannel(String::new()))
        .await
        .expect("clear channel");

    ctx.workflow.handle(Action::Post).await.expect("post");

    let state = ctx.workflow.state();
    assert_eq!(
        state.status.as_ref().map(|s| s.severity),
        Some(Severity::Error)
    );
    assert!(state.history.is_empty());
    // Only the generation call went out.
    assert_eq!(ctx.gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_post_without_summary_is_rejected_synchronously() {
    let mut ctx = create_test_workflow();
    ctx.workflow.handle(Action::Post).await.expect("post");

    let status = ctx.workflow.state().status.as_ref().expect("status set");
    assert_eq!(status.severity, Severity::Error);
    assert!(ctx.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_failed_post_allows_resubmission_without_reentry() {
    let mut ctx = create_test_workflow();
    generate(&mut ctx).await;

    ctx.gateway
        .push_json(json!({"success": false, "error": "channel archived"}));
    ctx.workflow.handle(Action::Post).await.expect("post");

    let state = ctx.workflow.state();
    assert!(state.history.is_empty());
    assert_eq!(
        state.status.as_ref().map(|s| s.text.as_str()),
        Some("channel archived")
    );
    assert_eq!(state.target_channel, "#eng");
    assert!(state.summary.is_some());

    // Retry with the preserved channel succeeds.
    ctx.gateway.push_json(json!({"success": true}));
    ctx.workflow.handle(Action::Post).await.expect("post");
    assert_eq!(ctx.workflow.state().history.len(), 1);
}

#[tokio::test]
async fn test_save_draft_with_empty_channel() {
    let mut ctx = create_test_workflow();
    generate(&mut ctx).await;
    ctx.workflow
        .handle(Action::SetTargetChannel(String::new()))
        .await
        .expect("clear channel");

    ctx.workflow
        .handle(Action::SaveDraft)
        .await
        .expect("save draft");

    let state = ctx.workflow.state();
    assert_eq!(state.history.len(), 1);
    let entry = &state.history.all()[0];
    assert_eq!(entry.status, EntryStatus::Draft);
    assert_eq!(entry.target_channel, "");
    // No gateway call for drafts.
    assert_eq!(ctx.gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_save_draft_without_summary_is_rejected() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::SaveDraft)
        .await
        .expect("save draft");

    let state = ctx.workflow.state();
    assert!(state.history.is_empty());
    assert_eq!(
        state.status.as_ref().map(|s| s.severity),
        Some(Severity::Error)
    );
}

#[tokio::test]
async fn test_add_custom_meeting_requires_title() {
    let mut ctx = create_test_workflow();
    let before = ctx.workflow.state().meetings.len();

    ctx.workflow
        .handle(Action::AddCustomMeeting(MeetingDraft::default()))
        .await
        .expect("add");

    let state = ctx.workflow.state();
    assert_eq!(state.meetings.len(), before);
    assert_eq!(
        state.status.as_ref().map(|s| s.text.as_str()),
        Some("Please enter a meeting title")
    );
}

#[tokio::test]
async fn test_add_custom_meeting_fills_defaults() {
    let mut ctx = create_test_workflow();

    ctx.workflow
        .handle(Action::AddCustomMeeting(MeetingDraft {
            title: "Incident Retro".to_string(),
            attendees: "Jordan Lee,  Mike Johnson , ".to_string(),
            ..MeetingDraft::default()
        }))
        .await
        .expect("add");

    let state = ctx.workflow.state();
    let meeting = &state.meetings[0];
    assert_eq!(meeting.title, "Incident Retro");
    assert_eq!(meeting.attendees, vec!["Jordan Lee", "Mike Johnson"]);
    assert_eq!(meeting.time, "12:00 PM");
    assert_eq!(meeting.duration, "1 hour");
    assert_eq!(meeting.channel, "#general");
    assert_eq!(state.selected_meeting.as_deref(), Some(meeting.id.as_str()));
}

#[tokio::test(start_paused = true)]
async fn test_status_expires_after_delay() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::AddCustomMeeting(MeetingDraft {
            title: "Standup".to_string(),
            ..MeetingDraft::default()
        }))
        .await
        .expect("add");
    assert!(ctx.workflow.state().status.is_some());

    tokio::time::advance(STATUS_TTL + Duration::from_millis(50)).await;
    let action = ctx.action_rx.recv().await.expect("expiry action");
    assert!(matches!(action, Action::ExpireStatus(_)));

    ctx.workflow.handle(action).await.expect("expire");
    assert!(ctx.workflow.state().status.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_newer_status_cancels_pending_expiry() {
    let mut ctx = create_test_workflow();
    ctx.workflow
        .handle(Action::AddCustomMeeting(MeetingDraft {
            title: "First".to_string(),
            ..MeetingDraft::default()
        }))
        .await
        .expect("add");

    tokio::time::advance(Duration::from_secs(3)).await;
    ctx.workflow
        .handle(Action::AddCustomMeeting(MeetingDraft {
            title: "Second".to_string(),
            ..MeetingDraft::default()
        }))
        .await
        .expect("add");

    // Past the first message's deadline but before the second's: the first
    // timer was aborted, so nothing fires.
    tokio::time::advance(Duration::from_secs(4)).await;
    tokio::task::yield_now().await;
    assert!(ctx.action_rx.try_recv().is_err());
    assert!(ctx.workflow.state().status.is_some());

    tokio::time::advance(Duration::from_secs(3)).await;
    let action = ctx.action_rx.recv().await.expect("expiry action");
    ctx.workflow.handle(action).await.expect("expire");
    assert!(ctx.workflow.state().status.is_none());
}
