//! Total normalization of reasoning-service output into [`SummaryData`].
//!
//! The service's response schema is not contractually guaranteed: fields may
//! be missing, null, or the wrong type entirely. Every branch here
//! substitutes a fallback instead of failing - normalization never raises.

use crate::domain::{ActionItem, Meeting, SummaryData};
use serde_json::Value;

/// Coerces an arbitrary, possibly malformed payload into a well-formed
/// summary. Header fields fall back to the originating meeting; everything
/// else falls back to empty.
///
/// A raw value is used only when it has the expected shape: string fields
/// accept any string (including empty), sequence fields must literally be
/// arrays - a scalar where a sequence is expected counts as absent.
pub fn normalize(raw: Option<&Value>, meeting: &Meeting) -> SummaryData {
    SummaryData {
        meeting_title: str_field(raw, "meeting_title").unwrap_or_else(|| meeting.title.clone()),
        meeting_date: str_field(raw, "meeting_date").unwrap_or_else(|| meeting.date.clone()),
        meeting_time: str_field(raw, "meeting_time").unwrap_or_else(|| meeting.time.clone()),
        attendees: seq_field(raw, "attendees")
            .map(|items| items.iter().map(attendee_name).collect())
            .unwrap_or_else(|| meeting.attendees.clone()),
        summary: str_field(raw, "summary").unwrap_or_default(),
        action_items: seq_field(raw, "action_items")
            .map(|items| items.iter().map(action_item).collect())
            .unwrap_or_default(),
        key_decisions: string_list(raw, "key_decisions"),
        insights: string_list(raw, "insights"),
    }
}

fn str_field(raw: Option<&Value>, key: &str) -> Option<String> {
    raw?.get(key)?.as_str().map(str::to_string)
}

fn seq_field<'a>(raw: Option<&'a Value>, key: &str) -> Option<&'a Vec<Value>> {
    raw?.get(key)?.as_array()
}

/// Maps one raw action-item element. A malformed element (not an object)
/// still produces a well-formed item with every field defaulted.
fn action_item(value: &Value) -> ActionItem {
    ActionItem {
        task: item_str(value, "task", ""),
        owner: item_str(value, "owner", "Unassigned"),
        priority: item_str(value, "priority", "Medium"),
        deadline: item_str(value, "deadline", "TBD"),
    }
}

fn item_str(value: &Value, key: &str, fallback: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn attendee_name(value: &Value) -> String {
    value.as_str().unwrap_or("Unknown").to_string()
}

/// String sequence with element count preserved: non-string elements become
/// empty strings rather than being dropped.
fn string_list(raw: Option<&Value>, key: &str) -> Vec<String> {
    seq_field(raw, key)
        .map(|items| {
            items
                .iter()
                .map(|v| v.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
