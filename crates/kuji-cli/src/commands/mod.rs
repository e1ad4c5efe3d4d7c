pub mod draw;
pub mod history;
pub mod layout;
pub mod list;
pub mod play;
pub mod reset;
pub mod roster;
pub mod stats;
pub mod transfer;

use std::path::Path;

use clap::Args;
use kuji_core::JsonFileStore;
use kuji_draw::{LotterySession, PlacementConfig, SessionConfig};

/// Spacing used when the CLI lays out a lineup, tighter than the planner default.
const CLI_MIN_DISTANCE: f64 = 3.0;

/// Options shared by every command that starts a draw session.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum spacing between placements
    #[arg(long, default_value_t = CLI_MIN_DISTANCE)]
    pub min_distance: f64,

    /// Keep roster order instead of shuffling the lineup
    #[arg(long)]
    pub no_shuffle: bool,
}

impl SessionArgs {
    /// Build a session config from the flags.
    pub fn config(&self) -> SessionConfig {
        let seed = self.seed.unwrap_or_else(rand::random);
        SessionConfig::default()
            .with_seed(seed)
            .with_shuffle(!self.no_shuffle)
            .with_placement(PlacementConfig::default().with_min_distance(self.min_distance))
    }
}

/// Open the roster file, creating an empty roster if it is missing.
fn open_store(path: &Path) -> Result<JsonFileStore, String> {
    JsonFileStore::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))
}

/// Open the roster file and start a session over it.
fn start_session(
    path: &Path,
    args: &SessionArgs,
) -> Result<LotterySession<JsonFileStore>, String> {
    let store = open_store(path)?;
    let config = args.config();
    tracing::debug!(seed = config.seed, shuffle = config.shuffle, "starting session");
    LotterySession::start(store, config).map_err(|e| e.to_string())
}
