//! One-shot generation without the TUI.
//!
//! Drives the same workflow the TUI uses, prints the normalized summary as
//! JSON on stdout, and optionally posts it or saves it as a draft.

use crate::agents::http::HttpAgentGateway;
use crate::app::workflow::{Action, Workflow};
use crate::config::{logs_dir, Config};
use crate::domain::Meeting;
use crate::state::{SessionState, Severity};
use crate::state_machine::WorkflowStateMachine;
use crate::structured_logger::StructuredLogger;
use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

pub struct GenerateArgs {
    pub meeting_id: String,
    pub channel: Option<String>,
    pub post: bool,
    pub draft: bool,
}

pub async fn run_generate(config: Config, meetings: Vec<Meeting>, args: GenerateArgs) -> Result<()> {
    let session_id = Uuid::new_v4().to_string();
    let logger = Arc::new(StructuredLogger::new(&session_id, &logs_dir()?)?);
    let (machine, _snapshot_rx) =
        WorkflowStateMachine::new(SessionState::new(meetings), Arc::clone(&logger));
    let gateway = Arc::new(HttpAgentGateway::new(&config.gateway)?);

    // Nobody reads the action channel here; it only exists so status-expiry
    // timers have somewhere to send.
    let (action_tx, _action_rx) = mpsc::unbounded_channel();
    let mut workflow = Workflow::new(
        machine,
        gateway,
        config.agents.clone(),
        config.defaults.clone(),
        logger,
        action_tx,
    );

    workflow.select_meeting(&args.meeting_id)?;
    if let Some(channel) = args.channel {
        workflow.handle(Action::SetContextChannel(channel)).await?;
    }
    workflow.handle(Action::Generate).await?;
    bail_on_error_status(&workflow, "Generation failed")?;

    let summary = match &workflow.state().summary {
        Some(summary) => summary.clone(),
        None => bail!("No summary was produced"),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.draft {
        workflow.handle(Action::SaveDraft).await?;
        eprintln!("Draft saved to history");
    } else if args.post {
        workflow.handle(Action::Post).await?;
        bail_on_error_status(&workflow, "Posting failed")?;
        eprintln!(
            "Summary posted to {}",
            workflow.state().target_channel
        );
    }

    Ok(())
}

fn bail_on_error_status(workflow: &Workflow, context: &str) -> Result<()> {
    if let Some(status) = &workflow.state().status {
        if status.severity == Severity::Error {
            bail!("{}: {}", context, status.text);
        }
    }
    Ok(())
}
