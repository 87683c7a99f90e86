//! Append-only session history of finalized summaries.

use crate::domain::HistoryEntry;
use serde::Serialize;

/// In-memory, most-recent-first ledger of posted and drafted summaries.
///
/// No removal, no update, no deduplication: repeated redrafts of the same
/// meeting are expected to produce multiple entries. Ordering is strictly
/// by append order (newest first), never by the `posted_at` field, which may
/// be supplied by the publishing service and is not guaranteed monotonic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry so iteration order stays reverse-chronological.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// All entries, most recent first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryStatus, Meeting, SummaryData};

    fn entry(id: &str, status: EntryStatus) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            summary: SummaryData::from_meeting(&Meeting::samples()[0]),
            status,
            target_channel: "#eng".to_string(),
            posted_at: "2026-02-20T10:45:00Z".to_string(),
        }
    }

    #[test]
    fn test_append_order_is_most_recent_first() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry("e1", EntryStatus::Posted));
        ledger.append(entry("e2", EntryStatus::Draft));
        ledger.append(entry("e3", EntryStatus::Posted));

        let ids: Vec<&str> = ledger.all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e2", "e1"]);
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry("same", EntryStatus::Draft));
        ledger.append(entry("same", EntryStatus::Draft));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_drafts_and_posts_interleave_in_append_order() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry("a", EntryStatus::Draft));
        ledger.append(entry("b", EntryStatus::Posted));
        ledger.append(entry("c", EntryStatus::Draft));

        let statuses: Vec<EntryStatus> = ledger.all().iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![EntryStatus::Draft, EntryStatus::Posted, EntryStatus::Draft]
        );
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.all().is_empty());
    }
}
