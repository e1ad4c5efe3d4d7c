use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};
use crate::error::{CoreResult, StoreError};
use crate::record::{SelectionLog, SelectionRecord};

/// Draw progress across the whole roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of entries.
    pub total: usize,
    /// Number of drawn entries.
    pub selected: usize,
    /// Number of entries still undrawn.
    pub remaining: usize,
    /// Drawn share of the roster, rounded to a whole percent.
    pub percentage: u32,
    /// Every entry has been drawn, and there was at least one.
    pub is_complete: bool,
}

/// The persisted roster: every entry plus the draw-order log.
///
/// This is the document a store reads and writes as a whole. All mutating
/// methods bump `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<Entry>,
    #[serde(default)]
    selections: SelectionLog,
    /// When the roster was first created.
    pub created_at: DateTime<Utc>,
    /// When the roster was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            entries: Vec::new(),
            selections: SelectionLog::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Parse a roster from its JSON form and [`validate`](Self::validate) it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let roster: Self = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Check the invariants a hand-edited or foreign document may break.
    ///
    /// Entry ids are unique, an entry is drawn exactly when it carries a
    /// draw time, and no id is logged twice. A log record for an entry still
    /// in the roster must point at a drawn entry; records for removed
    /// entries are kept by [`remove`](Self::remove) and are accepted.
    pub fn validate(&self) -> CoreResult<()> {
        let mut ids = HashSet::new();
        for entry in &self.entries {
            if !ids.insert(entry.id) {
                return Err(StoreError::InvalidRoster(format!(
                    "duplicate entry id {}",
                    entry.id.full()
                )));
            }
            if entry.selected != entry.selected_at.is_some() {
                return Err(StoreError::InvalidRoster(format!(
                    "entry \"{}\" has selected = {} but selected_at is {}",
                    entry.name,
                    entry.selected,
                    if entry.selected_at.is_some() { "set" } else { "missing" }
                )));
            }
        }

        let mut logged = HashSet::new();
        for record in &self.selections {
            if !logged.insert(record.id) {
                return Err(StoreError::InvalidRoster(format!(
                    "\"{}\" is logged as drawn more than once",
                    record.display_name
                )));
            }
            if self.get(record.id).is_some_and(|e| !e.selected) {
                return Err(StoreError::InvalidRoster(format!(
                    "\"{}\" is logged as drawn but is not marked selected",
                    record.display_name
                )));
            }
        }
        Ok(())
    }

    /// Encode the roster as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The draw-order log.
    pub fn selections(&self) -> &SelectionLog {
        &self.selections
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by ID.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries not yet drawn, in insertion order.
    pub fn unselected(&self) -> Vec<&Entry> {
        self.entries.iter().filter(|e| !e.selected).collect()
    }

    /// Entries already drawn, in insertion order.
    pub fn selected(&self) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.selected).collect()
    }

    /// Resolve a (possibly shortened) hyphenated ID.
    pub fn find_by_prefix(&self, prefix: &str) -> CoreResult<EntryId> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(StoreError::NoMatch(prefix));
        }
        let mut matches = self.entries.iter().filter(|e| e.id.full().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(e), None) => Ok(e.id),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousPrefix(prefix)),
            (None, _) => Err(StoreError::NoMatch(prefix)),
        }
    }

    /// Draw progress.
    pub fn statistics(&self) -> Statistics {
        let total = self.entries.len();
        let selected = self.entries.iter().filter(|e| e.selected).count();
        let remaining = total - selected;
        let percentage = if total > 0 {
            (selected as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Statistics {
            total,
            selected,
            remaining,
            percentage,
            is_complete: remaining == 0 && total > 0,
        }
    }

    // -----------------------------------------------------------------------
    // Management
    // -----------------------------------------------------------------------

    /// Add one entry. The name is trimmed; blank names are rejected.
    pub fn add_entry(&mut self, name: &str) -> CoreResult<Entry> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let entry = Entry::new(trimmed);
        self.entries.push(entry.clone());
        self.touch();
        Ok(entry)
    }

    /// Add many entries, skipping blank names. Returns the added entries.
    pub fn add_entries<I, S>(&mut self, names: I) -> Vec<Entry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added: Vec<Entry> = names
            .into_iter()
            .filter_map(|n| {
                let trimmed = n.as_ref().trim();
                (!trimmed.is_empty()).then(|| Entry::new(trimmed))
            })
            .collect();
        self.entries.extend(added.iter().cloned());
        self.touch();
        added
    }

    /// Replace everything with `count` numbered entries (`User 1` ..).
    pub fn generate(&mut self, count: usize) -> Vec<Entry> {
        self.clear_all();
        self.add_entries((1..=count).map(|i| format!("User {i}")))
    }

    /// Rename an entry.
    pub fn rename(&mut self, id: EntryId, name: &str) -> CoreResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entry.name = trimmed.to_string();
        self.touch();
        Ok(())
    }

    /// Remove an entry. Its selection records stay in the log.
    pub fn remove(&mut self, id: EntryId) -> CoreResult<Entry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.entries.remove(pos);
        self.touch();
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Selection state
    // -----------------------------------------------------------------------

    /// Mark an entry drawn at `at`.
    pub fn mark_selected(&mut self, id: EntryId, at: DateTime<Utc>) -> CoreResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entry.mark_selected(at);
        self.touch();
        Ok(())
    }

    /// Append to the draw-order log.
    pub fn append_selection_record(&mut self, record: SelectionRecord) {
        self.selections.append(record);
        self.touch();
    }

    /// Mark the entry and append its record together. Nothing changes if
    /// the entry does not exist.
    pub fn record_selection(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        self.mark_selected(record.id, record.selected_at)?;
        self.append_selection_record(record.clone());
        Ok(())
    }

    /// Undraw every entry and clear the log, keeping the entries.
    pub fn clear_selections(&mut self) {
        for entry in &mut self.entries {
            entry.clear_selection();
        }
        self.selections.clear();
        self.touch();
    }

    /// Drop every entry and the log.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.selections.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
