//! In-process roster store.

use chrono::{DateTime, Utc};

use super::EntryStore;
use crate::entry::{Entry, EntryId};
use crate::error::{CoreResult, StoreError};
use crate::record::{SelectionLog, SelectionRecord};
use crate::roster::Roster;

/// An in-process store. Writes can be switched off to simulate a failing
/// backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    roster: Roster,
    read_only: bool,
}

impl MemoryStore {
    /// Create a store holding an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `roster`.
    pub fn from_roster(roster: Roster) -> Self {
        Self {
            roster,
            read_only: false,
        }
    }

    /// Create a store with one undrawn entry per name.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Roster::new();
        roster.add_entries(names);
        Self::from_roster(roster)
    }

    /// The current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Make every subsequent write fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Apply a roster mutation as one write.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut Roster) -> CoreResult<T>) -> CoreResult<T> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut next = self.roster.clone();
        let out = f(&mut next)?;
        self.roster = next;
        Ok(out)
    }
}

impl EntryStore for MemoryStore {
    fn list_entries(&self) -> CoreResult<Vec<Entry>> {
        Ok(self.roster.entries().to_vec())
    }

    fn list_selection_records(&self) -> CoreResult<SelectionLog> {
        Ok(self.roster.selections().clone())
    }

    fn mark_selected(&mut self, id: EntryId, at: DateTime<Utc>) -> CoreResult<()> {
        self.update(|r| r.mark_selected(id, at))
    }

    fn append_selection_record(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        self.update(|r| {
            r.append_selection_record(record.clone());
            Ok(())
        })
    }

    fn clear_selections(&mut self) -> CoreResult<()> {
        self.update(|r| {
            r.clear_selections();
            Ok(())
        })
    }

    fn clear_all(&mut self) -> CoreResult<()> {
        self.update(|r| {
            r.clear_all();
            Ok(())
        })
    }

    fn commit_selection(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        self.update(|r| r.record_selection(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entries_in_insertion_order() {
        let store = MemoryStore::with_names(["A", "B", "C"]);
        let names: Vec<_> = store
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn commit_selection_marks_and_logs() {
        let mut store = MemoryStore::with_names(["A", "B"]);
        let a = store.list_entries().unwrap()[0].clone();
        store
            .commit_selection(&SelectionRecord::for_entry(&a, Utc::now()))
            .unwrap();
        assert!(store.roster().get(a.id).unwrap().selected);
        assert_eq!(store.list_selection_records().unwrap().len(), 1);
    }

    #[test]
    fn read_only_rejects_every_write() {
        let mut store = MemoryStore::with_names(["A"]);
        let a = store.list_entries().unwrap()[0].clone();
        store.set_read_only(true);

        let record = SelectionRecord::for_entry(&a, Utc::now());
        assert!(matches!(store.commit_selection(&record), Err(StoreError::ReadOnly)));
        assert!(matches!(store.mark_selected(a.id, Utc::now()), Err(StoreError::ReadOnly)));
        assert!(matches!(store.clear_selections(), Err(StoreError::ReadOnly)));
        assert!(matches!(store.clear_all(), Err(StoreError::ReadOnly)));

        assert!(!store.roster().get(a.id).unwrap().selected);
        assert_eq!(store.roster().len(), 1);
    }

    #[test]
    fn failed_update_leaves_roster_untouched() {
        let mut store = MemoryStore::with_names(["A"]);
        let before = store.roster().clone();
        let result: CoreResult<()> = store.update(|r| {
            r.clear_all();
            Err(StoreError::InvalidName(String::new()))
        });
        assert!(result.is_err());
        assert_eq!(store.roster(), &before);
    }

    #[test]
    fn clear_selections_and_clear_all() {
        let mut store = MemoryStore::with_names(["A", "B"]);
        let a = store.list_entries().unwrap()[0].clone();
        store
            .commit_selection(&SelectionRecord::for_entry(&a, Utc::now()))
            .unwrap();
        store.clear_selections().unwrap();
        assert!(store.list_entries().unwrap().iter().all(|e| !e.selected));
        assert!(store.list_selection_records().unwrap().is_empty());

        store.clear_all().unwrap();
        assert!(store.list_entries().unwrap().is_empty());
    }

    #[test]
    fn works_through_mutable_reference() {
        fn clear(mut store: impl EntryStore) {
            store.clear_all().unwrap();
        }
        let mut store = MemoryStore::with_names(["A"]);
        clear(&mut store);
        assert!(store.roster().is_empty());
    }
}
