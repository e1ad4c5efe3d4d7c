//! Configuration for a draw session.

use serde::{Deserialize, Serialize};

use crate::placement::PlacementConfig;

/// Configuration for a draw session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for the shuffle, the layout, and the draws.
    pub seed: u64,
    /// Shuffle the lineup before laying it out.
    pub shuffle: bool,
    /// Planner tuning.
    pub placement: PlacementConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle: true,
            placement: PlacementConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the lineup shuffle.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Replace the planner tuning.
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, 42);
        assert!(cfg.shuffle);
        assert_eq!(cfg.placement, PlacementConfig::default());
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(7)
            .with_shuffle(false)
            .with_placement(PlacementConfig::default().with_min_distance(3.0));
        assert_eq!(cfg.seed, 7);
        assert!(!cfg.shuffle);
        assert_eq!(cfg.placement.min_distance, 3.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SessionConfig = serde_json::from_str(r#"{ "shuffle": false }"#).unwrap();
        assert!(!cfg.shuffle);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.placement.max_attempts, 50);
    }
}
