//! Terminal lifecycle and the main event loop.

use super::{ui, Event, EventHandler, TuiApp};
use crate::agents::http::HttpAgentGateway;
use crate::app::workflow::{run_workflow_loop, Workflow};
use crate::config::{logs_dir, Config};
use crate::domain::Meeting;
use crate::state::SessionState;
use crate::state_machine::WorkflowStateMachine;
use crate::structured_logger::StructuredLogger;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

pub async fn run_tui(config: Config, meetings: Vec<Meeting>) -> Result<()> {
    let session_id = Uuid::new_v4().to_string();
    let logger = Arc::new(StructuredLogger::new(&session_id, &logs_dir()?)?);
    let (machine, snapshot_rx) =
        WorkflowStateMachine::new(SessionState::new(meetings), Arc::clone(&logger));
    let gateway = Arc::new(HttpAgentGateway::new(&config.gateway)?);

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let workflow = Workflow::new(
        machine,
        gateway,
        config.agents.clone(),
        config.defaults.clone(),
        Arc::clone(&logger),
        action_tx.clone(),
    );
    tokio::spawn(run_workflow_loop(workflow, action_rx));

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableBracketedPaste
    )?;

    // Restore the terminal even if a draw panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableBracketedPaste,
            crossterm::cursor::Show
        );
        original_hook(panic_info);
    }));

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = TuiApp::new(config, action_tx, snapshot_rx.borrow().clone());
    let mut events = EventHandler::new(Duration::from_millis(100));

    let result = loop {
        app.snapshot = snapshot_rx.borrow().clone();
        if let Err(err) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(err.into());
        }

        match events.next().await {
            Ok(Event::Key(key)) => app.handle_key(key),
            Ok(Event::Paste(text)) => app.handle_paste(&text),
            Ok(Event::Tick) => app.on_tick(),
            Ok(Event::Resize) => {}
            Err(err) => break Err(err),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableBracketedPaste,
        crossterm::cursor::Show
    )?;

    eprintln!(
        "Session {} log: {}",
        logger.session_id(),
        logger.path().display()
    );
    result
}
