//! Structured JSONL logger for debugging and event reconstruction.
//!
//! Machine-parseable logging with monotonic sequence numbers, ISO 8601
//! timestamps, and a session id for correlation. Every command applied to
//! the state machine and every event it emits ends up here, as does every
//! gateway invocation.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::state_machine::{StateCommand, StateEvent};

pub struct StructuredLogger {
    session_id: String,
    seq: AtomicU64,
    log_file: Mutex<File>,
    log_path: PathBuf,
}

/// A single log entry in JSONL format.
#[derive(Serialize, serde::Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number, unique across the session.
    pub seq: u64,
    /// ISO 8601 timestamp with microseconds.
    pub ts: String,
    pub session_id: String,
    /// Component that emitted the log.
    pub component: String,
    /// Structured event data.
    pub event: Value,
}

impl StructuredLogger {
    /// Creates a logger writing to `<logs_dir>/events.jsonl`.
    pub fn new(session_id: &str, logs_dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(logs_dir)?;
        let log_path = logs_dir.join("events.jsonl");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            session_id: session_id.to_string(),
            seq: AtomicU64::new(0),
            log_file: Mutex::new(file),
            log_path,
        })
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Logs a structured event as a single JSON line. Thread-safe; logging
    /// failures are swallowed so they can never take the workflow down.
    pub fn log(&self, component: &str, event: impl Serialize) {
        let entry = LogEntry {
            seq: self.next_seq(),
            ts: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            session_id: self.session_id.clone(),
            component: component.to_string(),
            event: serde_json::to_value(event).unwrap_or(Value::Null),
        };

        if let Ok(mut file) = self.log_file.lock() {
            if let Ok(line) = serde_json::to_string(&entry) {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        }
    }

    /// Logs a state machine command before it is applied.
    pub fn log_command(&self, machine_seq: u64, command: &StateCommand) {
        self.log(
            "StateMachine",
            serde_json::json!({
                "type": "Command",
                "machine_seq": machine_seq,
                "command": command
            }),
        );
    }

    /// Logs a state machine event after a command was applied.
    pub fn log_event(&self, machine_seq: u64, event: &StateEvent) {
        self.log(
            "StateMachine",
            serde_json::json!({
                "type": "Event",
                "machine_seq": machine_seq,
                "event": event
            }),
        );
    }

    /// Logs a gateway invocation (the prompt itself is not logged; it can
    /// be large and may embed meeting content).
    pub fn log_agent_invocation(&self, agent_id: &str, purpose: &str, prompt_chars: usize) {
        self.log(
            "Gateway",
            serde_json::json!({
                "type": "Invocation",
                "agent_id": agent_id,
                "purpose": purpose,
                "prompt_chars": prompt_chars
            }),
        );
    }

    /// Logs a gateway completion.
    pub fn log_agent_complete(&self, agent_id: &str, success: bool) {
        self.log(
            "Gateway",
            serde_json::json!({
                "type": "Complete",
                "agent_id": agent_id,
                "success": success
            }),
        );
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_entries_are_jsonl_with_monotonic_seq() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let logger = StructuredLogger::new("s-1", temp.path()).expect("Failed to create logger");

        logger.log("Test", serde_json::json!({"a": 1}));
        logger.log_agent_invocation("agent-1", "generate", 42);
        logger.log_agent_complete("agent-1", true);

        let content = std::fs::read_to_string(logger.path()).expect("Failed to read log");
        let entries: Vec<LogEntry> = content
            .lines()
            .map(|line| serde_json::from_str(line).expect("Each line is valid JSON"))
            .collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].seq, 1);
        assert_eq!(entries[1].seq, 2);
        assert_eq!(entries[2].seq, 3);
        assert_eq!(entries[0].session_id, "s-1");
        assert_eq!(entries[1].component, "Gateway");
        assert_eq!(entries[1].event["agent_id"], "agent-1");
    }
}
