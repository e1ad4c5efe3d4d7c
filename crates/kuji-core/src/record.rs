use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};

/// One line of the draw-order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// The drawn entry.
    pub id: EntryId,
    /// Entry name at the time of the draw.
    pub display_name: String,
    /// When the draw happened.
    pub selected_at: DateTime<Utc>,
}

impl SelectionRecord {
    /// Snapshot an entry as drawn at `at`.
    pub fn for_entry(entry: &Entry, at: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            display_name: entry.name.clone(),
            selected_at: at,
        }
    }
}

/// Append-only log of draws, in draw order. Cleared only in bulk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionLog {
    records: Vec<SelectionRecord>,
}

impl SelectionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&mut self, record: SelectionRecord) {
        self.records.push(record);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[SelectionRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `id` has been drawn.
    pub fn contains(&self, id: EntryId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Draw Results\n\n");
        if self.records.is_empty() {
            out.push_str("_No draws yet._\n");
            return out;
        }
        out.push_str("| # | Name | Drawn at |\n|---|------|----------|\n");
        for (i, r) in self.records.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                i + 1,
                r.display_name,
                r.selected_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        out
    }

    /// Export the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Draw Results\n============\n\n");
        for (i, r) in self.records.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {} ({})\n",
                i + 1,
                r.display_name,
                r.selected_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        out
    }
}

impl<'a> IntoIterator for &'a SelectionLog {
    type Item = &'a SelectionRecord;
    type IntoIter = std::slice::Iter<'a, SelectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
