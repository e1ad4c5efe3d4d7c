use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the generated avatar seed.
const AVATAR_SEED_LEN: usize = 9;

/// Unique identifier for every entry in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The full hyphenated form, used for prefix lookups.
    pub fn full(&self) -> String {
        self.0.to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// One drawable participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier for the lifetime of the entry.
    pub id: EntryId,
    /// Display name.
    pub name: String,
    /// Seed handed to the avatar renderer.
    pub avatar_seed: String,
    /// Whether this entry has been drawn.
    pub selected: bool,
    /// When this entry was drawn. Set together with `selected`.
    pub selected_at: Option<DateTime<Utc>>,
    /// When this entry was added to the roster.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create an undrawn entry with a fresh ID and avatar seed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            avatar_seed: random_avatar_seed(),
            selected: false,
            selected_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the entry drawn at `at`. A second call keeps the first timestamp.
    pub fn mark_selected(&mut self, at: DateTime<Utc>) {
        if !self.selected {
            self.selected = true;
            self.selected_at = Some(at);
        }
    }

    /// Return the entry to the undrawn state.
    pub fn clear_selection(&mut self) {
        self.selected = false;
        self.selected_at = None;
    }
}

fn random_avatar_seed() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(AVATAR_SEED_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_undrawn() {
        let e = Entry::new("Alice");
        assert_eq!(e.name, "Alice");
        assert!(!e.selected);
        assert!(e.selected_at.is_none());
        assert_eq!(e.avatar_seed.len(), AVATAR_SEED_LEN);
    }

    #[test]
    fn mark_selected_sets_timestamp_once() {
        let mut e = Entry::new("Bob");
        let first = Utc::now();
        e.mark_selected(first);
        e.mark_selected(first + chrono::Duration::seconds(5));
        assert!(e.selected);
        assert_eq!(e.selected_at, Some(first));
    }

    #[test]
    fn clear_selection_resets_both_fields() {
        let mut e = Entry::new("Carol");
        e.mark_selected(Utc::now());
        e.clear_selection();
        assert!(!e.selected);
        assert!(e.selected_at.is_none());
    }

    #[test]
    fn display_is_short_prefix() {
        let id = EntryId::new();
        assert_eq!(id.to_string().len(), 8);
        assert!(id.full().starts_with(&id.to_string()));
    }
}
