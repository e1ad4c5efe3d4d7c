//! The persistent store contract a draw session writes through.
//!
//! Every write is atomic: it either lands completely or fails and leaves
//! the stored roster untouched.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::entry::{Entry, EntryId};
use crate::error::CoreResult;
use crate::record::{SelectionLog, SelectionRecord};

/// Durable home of the roster.
pub trait EntryStore {
    /// Every entry, in a stable order.
    fn list_entries(&self) -> CoreResult<Vec<Entry>>;

    /// The draw-order log.
    fn list_selection_records(&self) -> CoreResult<SelectionLog>;

    /// Mark one entry drawn at `at`.
    fn mark_selected(&mut self, id: EntryId, at: DateTime<Utc>) -> CoreResult<()>;

    /// Append one record to the draw-order log.
    fn append_selection_record(&mut self, record: &SelectionRecord) -> CoreResult<()>;

    /// Undraw every entry and clear the log.
    fn clear_selections(&mut self) -> CoreResult<()>;

    /// Drop every entry and the log.
    fn clear_all(&mut self) -> CoreResult<()>;

    /// Mark the entry and append its record as one write.
    ///
    /// The provided version issues the two primitive writes in sequence and
    /// is only atomic if the store is; implementations should override it.
    fn commit_selection(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        self.mark_selected(record.id, record.selected_at)?;
        self.append_selection_record(record)
    }
}

impl<S: EntryStore + ?Sized> EntryStore for &mut S {
    fn list_entries(&self) -> CoreResult<Vec<Entry>> {
        (**self).list_entries()
    }

    fn list_selection_records(&self) -> CoreResult<SelectionLog> {
        (**self).list_selection_records()
    }

    fn mark_selected(&mut self, id: EntryId, at: DateTime<Utc>) -> CoreResult<()> {
        (**self).mark_selected(id, at)
    }

    fn append_selection_record(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        (**self).append_selection_record(record)
    }

    fn clear_selections(&mut self) -> CoreResult<()> {
        (**self).clear_selections()
    }

    fn clear_all(&mut self) -> CoreResult<()> {
        (**self).clear_all()
    }

    fn commit_selection(&mut self, record: &SelectionRecord) -> CoreResult<()> {
        (**self).commit_selection(record)
    }
}
