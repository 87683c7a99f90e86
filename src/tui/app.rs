//! UI-local state and key handling.
//!
//! The TUI owns nothing but presentation state (selections, input buffers,
//! overlays). Everything that matters lives in the snapshot and is mutated
//! only by sending actions to the workflow.

use crate::app::workflow::{Action, MeetingDraft};
use crate::config::Config;
use crate::domain::{has_text, Meeting, PRIORITIES};
use crate::state::View;
use crate::state_machine::{ActionItemField, StateSnapshot, SummaryField};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

/// Field labels of the custom-meeting form, in focus order.
pub const FORM_FIELDS: [&str; 8] = [
    "Title",
    "Date (YYYY-MM-DD)",
    "Time",
    "Duration",
    "Attendees (comma separated)",
    "Channel",
    "Description",
    "Agenda",
];

#[derive(Debug, Default)]
pub struct MeetingForm {
    pub values: [String; 8],
    pub focus: usize,
}

impl MeetingForm {
    fn into_draft(self) -> MeetingDraft {
        let [title, date, time, duration, attendees, channel, description, agenda] = self.values;
        MeetingDraft {
            title,
            date,
            time,
            duration,
            attendees,
            description,
            agenda,
            channel,
        }
    }
}

/// Which block of the review screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSection {
    /// Meeting title, date, and time rows of the header card.
    Header,
    Summary,
    ActionItems,
    Decisions,
    Insights,
    Channel,
}

impl ReviewSection {
    pub fn next(self) -> Self {
        match self {
            ReviewSection::Header => ReviewSection::Summary,
            ReviewSection::Summary => ReviewSection::ActionItems,
            ReviewSection::ActionItems => ReviewSection::Decisions,
            ReviewSection::Decisions => ReviewSection::Insights,
            ReviewSection::Insights => ReviewSection::Channel,
            ReviewSection::Channel => ReviewSection::Header,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ReviewSection::Header => ReviewSection::Channel,
            ReviewSection::Summary => ReviewSection::Header,
            ReviewSection::ActionItems => ReviewSection::Summary,
            ReviewSection::Decisions => ReviewSection::ActionItems,
            ReviewSection::Insights => ReviewSection::Decisions,
            ReviewSection::Channel => ReviewSection::Insights,
        }
    }
}

/// Where a submitted input buffer goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    Search,
    ContextChannel,
    TargetChannel,
    Summary(SummaryField),
    ActionItem {
        index: usize,
        field: ActionItemField,
    },
    Decision(usize),
    Insight(usize),
}

/// A single-line editor overlay.
#[derive(Debug)]
pub struct InputState {
    pub target: InputTarget,
    pub label: &'static str,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pub cursor: usize,
}

impl InputState {
    fn new(target: InputTarget, label: &'static str, initial: &str) -> Self {
        Self {
            target,
            label,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }
}

pub struct TuiApp {
    pub config: Config,
    pub snapshot: StateSnapshot,
    action_tx: mpsc::UnboundedSender<Action>,
    pub should_quit: bool,
    pub tick: usize,

    // Dashboard
    pub search_query: String,
    pub meeting_index: usize,

    // Review
    pub review_section: ReviewSection,
    pub review_index: usize,

    // History
    pub history_index: usize,
    pub expanded_entry: Option<String>,

    // Overlays
    pub input: Option<InputState>,
    pub form: Option<MeetingForm>,
}

impl TuiApp {
    pub fn new(
        config: Config,
        action_tx: mpsc::UnboundedSender<Action>,
        snapshot: StateSnapshot,
    ) -> Self {
        Self {
            config,
            snapshot,
            action_tx,
            should_quit: false,
            tick: 0,
            search_query: String::new(),
            meeting_index: 0,
            review_section: ReviewSection::Summary,
            review_index: 0,
            history_index: 0,
            expanded_entry: None,
            input: None,
            form: None,
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Meetings matching the search query, display order preserved.
    pub fn filtered_meetings(&self) -> Vec<&Meeting> {
        let query = self.search_query.to_lowercase();
        self.snapshot
            .meetings
            .iter()
            .filter(|m| {
                query.is_empty()
                    || m.title.to_lowercase().contains(&query)
                    || m.attendees
                        .iter()
                        .any(|a| a.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }
        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.send(Action::Navigate(View::Dashboard)),
            KeyCode::Char('2') => self.send(Action::Navigate(View::History)),
            KeyCode::Char('3') => self.send(Action::Navigate(View::Settings)),
            _ => match self.snapshot.view {
                View::Dashboard => self.handle_dashboard_key(key),
                View::Review => self.handle_review_key(key),
                View::History => self.handle_history_key(key),
                View::Settings => {
                    if key.code == KeyCode::Esc {
                        self.send(Action::Navigate(View::Dashboard));
                    }
                }
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.input.as_mut() {
            input.insert_str(text);
            if input.target == InputTarget::Search {
                self.search_query = input.buffer.clone();
            }
        } else if let Some(form) = self.form.as_mut() {
            form.values[form.focus].push_str(text);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let visible = self.filtered_meetings().len();
        match key.code {
            KeyCode::Up => self.meeting_index = self.meeting_index.saturating_sub(1),
            KeyCode::Down => {
                if visible > 0 {
                    self.meeting_index = (self.meeting_index + 1).min(visible - 1);
                }
            }
            KeyCode::Enter => {
                let id = self
                    .filtered_meetings()
                    .get(self.meeting_index.min(visible.saturating_sub(1)))
                    .map(|m| m.id.clone());
                if let Some(id) = id {
                    self.send(Action::SelectMeeting(id));
                }
            }
            KeyCode::Char('g') => {
                if !self.snapshot.is_generating {
                    self.send(Action::Generate);
                }
            }
            KeyCode::Char('/') => {
                self.input = Some(InputState::new(
                    InputTarget::Search,
                    "Search meetings",
                    &self.search_query.clone(),
                ));
            }
            KeyCode::Char('c') => {
                let current = if has_text(&self.snapshot.context_channel) {
                    self.snapshot.context_channel.clone()
                } else {
                    self.snapshot
                        .selected_meeting()
                        .map(|m| m.channel.clone())
                        .unwrap_or_default()
                };
                self.input = Some(InputState::new(
                    InputTarget::ContextChannel,
                    "Channel for context",
                    &current,
                ));
            }
            KeyCode::Char('n') => self.form = Some(MeetingForm::default()),
            KeyCode::Char('v') => {
                if self.snapshot.summary.is_some() {
                    self.send(Action::Navigate(View::Review));
                }
            }
            _ => {}
        }
    }

    fn review_section_len(&self) -> usize {
        let Some(summary) = &self.snapshot.summary else {
            return 0;
        };
        match self.review_section {
            // Title, date, time.
            ReviewSection::Header => 3,
            ReviewSection::Summary | ReviewSection::Channel => 1,
            ReviewSection::ActionItems => summary.action_items.len(),
            ReviewSection::Decisions => summary.key_decisions.len(),
            ReviewSection::Insights => summary.insights.len(),
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.send(Action::Navigate(View::Dashboard)),
            KeyCode::Tab => {
                self.review_section = self.review_section.next();
                self.review_index = 0;
            }
            KeyCode::BackTab => {
                self.review_section = self.review_section.prev();
                self.review_index = 0;
            }
            KeyCode::Up => self.review_index = self.review_index.saturating_sub(1),
            KeyCode::Down => {
                let len = self.review_section_len();
                if len > 0 {
                    self.review_index = (self.review_index + 1).min(len - 1);
                }
            }
            KeyCode::Char('e') => self.open_review_editor(),
            KeyCode::Char('o') => {
                if self.review_section == ReviewSection::ActionItems {
                    self.open_action_item_editor(ActionItemField::Owner);
                }
            }
            KeyCode::Char('l') => {
                if self.review_section == ReviewSection::ActionItems {
                    self.open_action_item_editor(ActionItemField::Deadline);
                }
            }
            KeyCode::Char('r') => {
                if self.review_section == ReviewSection::ActionItems {
                    self.cycle_priority();
                }
            }
            KeyCode::Char('t') => {
                self.input = Some(InputState::new(
                    InputTarget::TargetChannel,
                    "Target channel",
                    &self.snapshot.target_channel.clone(),
                ));
            }
            KeyCode::Char('p') => {
                if !self.snapshot.is_posting {
                    self.send(Action::Post);
                }
            }
            KeyCode::Char('s') => self.send(Action::SaveDraft),
            _ => {}
        }
    }

    fn open_review_editor(&mut self) {
        let Some(summary) = &self.snapshot.summary else {
            return;
        };
        let index = self.review_index;
        self.input = match self.review_section {
            ReviewSection::Header => {
                let (field, label, value) = match index {
                    0 => (SummaryField::MeetingTitle, "Meeting title", &summary.meeting_title),
                    1 => (SummaryField::MeetingDate, "Meeting date", &summary.meeting_date),
                    _ => (SummaryField::MeetingTime, "Meeting time", &summary.meeting_time),
                };
                Some(InputState::new(InputTarget::Summary(field), label, value))
            }
            ReviewSection::Summary => Some(InputState::new(
                InputTarget::Summary(SummaryField::Summary),
                "Summary",
                &summary.summary,
            )),
            ReviewSection::ActionItems => summary.action_items.get(index).map(|item| {
                InputState::new(
                    InputTarget::ActionItem {
                        index,
                        field: ActionItemField::Task,
                    },
                    "Task",
                    &item.task,
                )
            }),
            ReviewSection::Decisions => summary.key_decisions.get(index).map(|decision| {
                InputState::new(InputTarget::Decision(index), "Key decision", decision)
            }),
            ReviewSection::Insights => summary
                .insights
                .get(index)
                .map(|insight| InputState::new(InputTarget::Insight(index), "Insight", insight)),
            ReviewSection::Channel => Some(InputState::new(
                InputTarget::TargetChannel,
                "Target channel",
                &self.snapshot.target_channel,
            )),
        };
    }

    fn open_action_item_editor(&mut self, field: ActionItemField) {
        let Some(summary) = &self.snapshot.summary else {
            return;
        };
        let index = self.review_index;
        self.input = summary.action_items.get(index).map(|item| {
            let (label, value) = match field {
                ActionItemField::Task => ("Task", item.task.as_str()),
                ActionItemField::Owner => ("Owner", item.owner.as_str()),
                ActionItemField::Priority => ("Priority", item.priority.as_str()),
                ActionItemField::Deadline => ("Deadline", item.deadline.as_str()),
            };
            InputState::new(InputTarget::ActionItem { index, field }, label, value)
        });
    }

    fn cycle_priority(&mut self) {
        let Some(summary) = &self.snapshot.summary else {
            return;
        };
        let index = self.review_index;
        if let Some(item) = summary.action_items.get(index) {
            let next = match PRIORITIES
                .iter()
                .position(|p| p.eq_ignore_ascii_case(&item.priority))
            {
                Some(i) => PRIORITIES[(i + 1) % PRIORITIES.len()],
                None => PRIORITIES[0],
            };
            self.send(Action::EditActionItem {
                index,
                field: ActionItemField::Priority,
                value: next.to_string(),
            });
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        let len = self.snapshot.history.len();
        match key.code {
            KeyCode::Up => self.history_index = self.history_index.saturating_sub(1),
            KeyCode::Down => {
                if len > 0 {
                    self.history_index = (self.history_index + 1).min(len - 1);
                }
            }
            KeyCode::Enter => {
                let id = self
                    .snapshot
                    .history
                    .get(self.history_index)
                    .map(|e| e.id.clone());
                if let Some(id) = id {
                    if self.expanded_entry.as_deref() == Some(id.as_str()) {
                        self.expanded_entry = None;
                    } else {
                        self.expanded_entry = Some(id);
                    }
                }
            }
            KeyCode::Esc => self.send(Action::Navigate(View::Dashboard)),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input = None;
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.backspace();
                    if input.target == InputTarget::Search {
                        self.search_query = input.buffer.clone();
                        self.meeting_index = 0;
                    }
                }
            }
            KeyCode::Left => {
                if let Some(input) = self.input.as_mut() {
                    input.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(input) = self.input.as_mut() {
                    input.move_right();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.input.as_mut() {
                    input.insert(c);
                    if input.target == InputTarget::Search {
                        self.search_query = input.buffer.clone();
                        self.meeting_index = 0;
                    }
                }
            }
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        let value = input.buffer;
        match input.target {
            InputTarget::Search => {
                self.search_query = value;
                self.meeting_index = 0;
            }
            InputTarget::ContextChannel => self.send(Action::SetContextChannel(value)),
            InputTarget::TargetChannel => self.send(Action::SetTargetChannel(value)),
            InputTarget::Summary(field) => self.send(Action::EditSummaryField { field, value }),
            InputTarget::ActionItem { index, field } => self.send(Action::EditActionItem {
                index,
                field,
                value,
            }),
            InputTarget::Decision(index) => self.send(Action::EditDecision { index, value }),
            InputTarget::Insight(index) => self.send(Action::EditInsight { index, value }),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.form = None;
            }
            KeyCode::Enter => {
                if let Some(form) = self.form.take() {
                    self.send(Action::AddCustomMeeting(form.into_draft()));
                }
            }
            code => {
                if let Some(form) = self.form.as_mut() {
                    match code {
                        KeyCode::Tab | KeyCode::Down => {
                            form.focus = (form.focus + 1) % FORM_FIELDS.len();
                        }
                        KeyCode::BackTab | KeyCode::Up => {
                            form.focus = (form.focus + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
                        }
                        KeyCode::Backspace => {
                            form.values[form.focus].pop();
                        }
                        KeyCode::Char(c) => form.values[form.focus].push(c),
                        _ => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionState;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> (TuiApp, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let snapshot = StateSnapshot::from(&SessionState::new(Meeting::samples()));
        (TuiApp::new(Config::default_config(), tx, snapshot), rx)
    }

    #[test]
    fn test_search_filters_by_title_and_attendee() {
        let (mut app, _rx) = test_app();
        app.search_query = "sprint".to_string();
        let filtered = app.filtered_meetings();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");

        app.search_query = "jordan".to_string();
        let by_attendee = app.filtered_meetings();
        assert_eq!(by_attendee.len(), 2);
    }

    #[test]
    fn test_enter_selects_filtered_meeting() {
        let (mut app, mut rx) = test_app();
        app.search_query = "security".to_string();
        app.handle_key(key(KeyCode::Enter));
        match rx.try_recv() {
            Ok(Action::SelectMeeting(id)) => assert_eq!(id, "5"),
            other => panic!("Expected SelectMeeting, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_key_respects_busy_flag() {
        let (mut app, mut rx) = test_app();
        app.snapshot.is_generating = true;
        app.handle_key(key(KeyCode::Char('g')));
        assert!(rx.try_recv().is_err());

        app.snapshot.is_generating = false;
        app.handle_key(key(KeyCode::Char('g')));
        assert!(matches!(rx.try_recv(), Ok(Action::Generate)));
    }

    #[test]
    fn test_input_editor_cursor_ops() {
        let mut input = InputState::new(InputTarget::Search, "Search", "ab");
        input.move_left();
        input.insert('x');
        assert_eq!(input.buffer, "axb");
        input.backspace();
        assert_eq!(input.buffer, "ab");
        input.move_right();
        input.insert('!');
        assert_eq!(input.buffer, "ab!");
    }

    #[test]
    fn test_form_submit_builds_draft() {
        let (mut app, mut rx) = test_app();
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.form.is_some());

        for c in "Retro".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(app.form.is_none());
        match rx.try_recv() {
            Ok(Action::AddCustomMeeting(draft)) => assert_eq!(draft.title, "Retro"),
            other => panic!("Expected AddCustomMeeting, got {:?}", other),
        }
    }
}
