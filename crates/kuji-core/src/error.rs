use crate::entry::EntryId;

/// Alias for `Result<T, StoreError>`.
pub type CoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading or writing the roster.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested entry ID does not exist in the roster.
    #[error("entry not found: {0}")]
    NotFound(EntryId),

    /// An entry name was empty after trimming.
    #[error("invalid entry name: \"{0}\"")]
    InvalidName(String),

    /// No entry ID starts with the given prefix.
    #[error("no entry matches \"{0}\"")]
    NoMatch(String),

    /// An ID prefix matched more than one entry.
    #[error("ambiguous entry id prefix: \"{0}\"")]
    AmbiguousPrefix(String),

    /// A loaded roster contradicts itself.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// The store refuses writes.
    #[error("store is read-only")]
    ReadOnly,

    /// The backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The roster document could not be encoded or decoded.
    #[error("roster serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
