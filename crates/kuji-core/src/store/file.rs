//! Roster persisted as a single JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::EntryStore;
use crate::entry::{Entry, EntryId};
use crate::error::CoreResult;
use crate::record::{SelectionLog, SelectionRecord};
use crate::roster::Roster;

/// A store that keeps the roster as one pretty-printed JSON file.
///
/// A missing file reads as an empty roster. Each write serializes the
/// whole roster to a sibling `.tmp` file and renames it over the target,
/// so the file on disk is always either the old or the new roster.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    roster: Roster,
}

impl JsonFileStore {
    /// Open the store at `path`, loading the roster if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let roster = if path.exists() {
            let json = fs::read_to_string(&path)?;
            Roster::from_json(&json)?
        } else {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            Roster::new()
        };
        Ok(Self { path, roster })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The roster as last loaded or written.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Replace the stored roster wholesale.
    pub fn replace(&mut self, roster: Roster) -> CoreResult<()> {
        self.persist(&roster)?;
        self.roster = roster;
        Ok(())
    }

    /// Apply a roster mutation as one write. On any error the file and the
    /// in-memory roster are unchanged.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut Roster) -> CoreResult<T>) -> CoreResult<T> {
        let mut next = self.roster.clone();
        let out = f(&mut next)?;
        self.replace(next)?;
        Ok(out)
    }

    fn persist(&self, roster: &Roster) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = roster.to_json()?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(
            path = %self.path.display(),
            entries = roster.len(),
            "roster written"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl EntryStore for JsonFileStore {
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
