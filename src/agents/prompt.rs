//! Prompt templating for both directions of the workflow.
//!
//! Pure string construction. The generation prompt tells the coordinator
//! what to summarize and what structure to come back with; the publish
//! prompt hands the (possibly edited) summary to the publisher.

use crate::domain::{ActionItem, Meeting, SummaryData};

/// The token used for an empty list in a publish payload.
const NONE_TOKEN: &str = "None";

/// Builds the instruction for the coordinator agent.
pub fn generation_prompt(meeting: &Meeting, channel: &str) -> String {
    format!(
        "Generate a comprehensive meeting summary for the following meeting:\n\
         Title: {}\n\
         Date: {}\n\
         Time: {}\n\
         Duration: {}\n\
         Attendees: {}\n\
         Description: {}\n\
         Agenda: {}\n\
         Channel for context: {}\n\
         \n\
         Please fetch relevant context from the channel and calendar event, \
         then generate a structured summary with action items (each with owner, \
         priority High/Medium/Low, and deadline), key decisions, and insights.",
        meeting.title,
        meeting.date,
        meeting.time,
        meeting.duration,
        meeting.attendees.join(", "),
        meeting.description,
        meeting.agenda,
        channel,
    )
}

/// Builds the instruction for the publisher agent.
pub fn publish_prompt(summary: &SummaryData, channel: &str) -> String {
    format!(
        "Post this meeting summary to channel \"{}\":\n\
         \n\
         Meeting Title: {}\n\
         Date: {} at {}\n\
         Attendees: {}\n\
         \n\
         Summary: {}\n\
         \n\
         Action Items:\n{}\n\
         \n\
         Key Decisions:\n{}\n\
         \n\
         Insights:\n{}",
        channel,
        summary.meeting_title,
        summary.meeting_date,
        summary.meeting_time,
        summary.attendees.join(", "),
        summary.summary,
        action_lines(&summary.action_items),
        bullet_lines(&summary.key_decisions),
        bullet_lines(&summary.insights),
    )
}

/// One bullet per element, or the literal `None` token when empty.
fn bullet_lines(items: &[String]) -> String {
    if items.is_empty() {
        return NONE_TOKEN.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn action_lines(items: &[ActionItem]) -> String {
    if items.is_empty() {
        return NONE_TOKEN.to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                "- {} | Owner: {} | Priority: {} | Deadline: {}",
                item.task, item.owner, item.priority, item.deadline
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Meeting;

    fn summary() -> SummaryData {
        SummaryData {
            meeting_title: "Sprint Planning".to_string(),
            meeting_date: "2026-02-20".to_string(),
            meeting_time: "10:00 AM".to_string(),
            attendees: vec!["Sarah Chen".to_string(), "Alex Kim".to_string()],
            summary: "Planned the sprint.".to_string(),
            action_items: vec![ActionItem {
                task: "Ship it".to_string(),
                owner: "Alex Kim".to_string(),
                priority: "High".to_string(),
                deadline: "2026-03-01".to_string(),
            }],
            key_decisions: vec!["Go".to_string(), "No scope creep".to_string()],
            insights: vec![],
        }
    }

    #[test]
    fn test_generation_prompt_embeds_meeting_fields() {
        let meeting = &Meeting::samples()[0];
        let prompt = generation_prompt(meeting, "#eng");

        assert!(prompt.contains("Title: Sprint Planning - Q1 2026"));
        assert!(prompt.contains("Date: 2026-02-20"));
        assert!(prompt.contains("Attendees: Sarah Chen, Mike Johnson, Priya Patel, Alex Kim"));
        assert!(prompt.contains("Channel for context: #eng"));
        assert!(prompt.contains("priority High/Medium/Low"));
    }

    #[test]
    fn test_publish_prompt_serializes_lists_as_bullets() {
        let prompt = publish_prompt(&summary(), "#eng");

        assert!(prompt.contains("to channel \"#eng\""));
        assert!(prompt.contains("Date: 2026-02-20 at 10:00 AM"));
        assert!(prompt
            .contains("- Ship it | Owner: Alex Kim | Priority: High | Deadline: 2026-03-01"));
        assert!(prompt.contains("- Go\n- No scope creep"));
    }

    #[test]
    fn test_publish_prompt_uses_none_token_for_empty_lists() {
        let mut data = summary();
        data.action_items.clear();
        data.key_decisions.clear();
        let prompt = publish_prompt(&data, "#eng");

        assert!(prompt.contains("Action Items:\nNone"));
        assert!(prompt.contains("Key Decisions:\nNone"));
        assert!(prompt.contains("Insights:\nNone"));
    }
}
