//! Error types for the lottery engine.

use kuji_core::StoreError;
use thiserror::Error;

use crate::session::SessionState;

/// Result type for lottery operations.
pub type LotteryResult<T> = Result<T, LotteryError>;

/// Errors that can occur while planning or running a draw session.
///
/// Everything except [`LotteryError::PersistenceFailure`] is a caller bug
/// and should not be retried as-is.
#[derive(Debug, Error)]
pub enum LotteryError {
    /// Bad planner or configuration input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not legal in the current session state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The state the session was in.
        state: SessionState,
    },

    /// A draw was attempted with nothing left in the pool.
    #[error("draw pool is empty")]
    EmptyPool,

    /// The store rejected a required write; session state is unchanged.
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),
}
