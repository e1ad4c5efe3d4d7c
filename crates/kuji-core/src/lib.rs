//! Core types for Kujikuji: entries, the selection log, and the roster store.
//!
//! This crate owns the persisted side of a lottery: who is in the roster,
//! who has already been drawn, and in what order. It knows nothing about
//! placement or draw sessions; those live in `kuji-draw` and talk to the
//! roster only through the [`EntryStore`] trait.

/// Entry types and identifiers.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// Append-only selection log.
pub mod record;
/// The persisted roster document and its management operations.
pub mod roster;
/// The store contract and its in-memory and JSON file implementations.
pub mod store;

/// Re-export entry types.
pub use entry::{Entry, EntryId};
/// Re-export error types.
pub use error::{CoreResult, StoreError};
/// Re-export selection log types.
pub use record::{SelectionLog, SelectionRecord};
/// Re-export roster types.
pub use roster::{Roster, Statistics};
/// Re-export store types.
pub use store::{EntryStore, JsonFileStore, MemoryStore};
