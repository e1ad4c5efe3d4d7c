//! Placement planner and single-draw lottery engine.
//!
//! A session lays its lineup out once with the [`PlacementPlanner`] (a
//! center-out spiral of grid cells, jittered, with a minimum spacing), then
//! draws entries one at a time without replacement. Every draw is written
//! through a [`kuji_core::EntryStore`] before the session moves on, and the
//! session only accepts the operations its current [`SessionState`] allows.

pub mod config;
pub mod error;
pub mod placement;
pub mod pool;
pub mod random;
pub mod session;
pub mod spiral;

pub use config::SessionConfig;
pub use error::{LotteryError, LotteryResult};
pub use placement::{Layout, Placement, PlacementConfig, PlacementPlanner, Position};
pub use pool::DrawPool;
pub use random::{RandomSource, ScriptedRandom};
pub use session::{DrawOutcome, LotterySession, SessionListener, SessionState, StateChange};
pub use spiral::{GridCell, SpiralCells, spiral_cells};
