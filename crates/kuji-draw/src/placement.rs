//! Collision-avoiding layout of a lineup on the ground plane.
//!
//! Each index gets the next spiral cell; its position is the cell origin
//! plus a uniform jitter, resampled until it keeps `min_distance` from every
//! position accepted so far. When `max_attempts` samples all collide the
//! entry is put exactly on its cell origin and flagged as forced; forced
//! placements are exempt from the spacing guarantee.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LotteryError, LotteryResult};
use crate::random::RandomSource;
use crate::spiral::{GridCell, SpiralCells};

/// Tuning for the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// World units between neighboring cell origins.
    pub cell_size: f64,
    /// Jitter applied to each axis, in `[-range, range)`.
    pub random_offset_range: f64,
    /// Rotation jitter in degrees, in `[-range, range)`.
    pub random_rotation_range: f64,
    /// Minimum spacing between non-forced placements.
    pub min_distance: f64,
    /// Samples tried per entry before falling back to the cell origin.
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cell_size: 6.0,
            random_offset_range: 2.0,
            random_rotation_range: 90.0,
            min_distance: 8.0,
            max_attempts: 50,
        }
    }
}

impl PlacementConfig {
    /// Set the cell size.
    pub fn with_cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    /// Set the per-axis jitter range.
    pub fn with_offset_range(mut self, range: f64) -> Self {
        self.random_offset_range = range;
        self
    }

    /// Set the rotation jitter range in degrees.
    pub fn with_rotation_range(mut self, degrees: f64) -> Self {
        self.random_rotation_range = degrees;
        self
    }

    /// Set the minimum spacing.
    pub fn with_min_distance(mut self, distance: f64) -> Self {
        self.min_distance = distance;
        self
    }

    /// Set the attempt budget per entry.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> LotteryResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LotteryError::InvalidArgument(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        for (name, value) in [
            ("random_offset_range", self.random_offset_range),
            ("random_rotation_range", self.random_rotation_range),
            ("min_distance", self.min_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LotteryError::InvalidArgument(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.max_attempts == 0 {
            return Err(LotteryError::InvalidArgument(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal axis.
    pub x: f64,
    /// Depth axis.
    pub z: f64,
}

impl Position {
    /// The point `(x, z)`.
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Heading in degrees that faces this point away from the origin, as
    /// `atan2(x, z)`.
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.z).to_degrees()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}

/// Where one lineup member stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Spiral cell assigned to this index.
    pub cell: GridCell,
    /// Cell origin plus jitter.
    pub position: Position,
    /// Facing angle in degrees.
    pub rotation: f64,
    /// Placed on the bare cell origin after every sample collided.
    pub forced: bool,
}

/// The planner's output, indexed like its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    placements: Vec<Placement>,
}

impl Layout {
    /// All placements, in index order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement for lineup index `index`.
    pub fn get(&self, index: usize) -> Option<&Placement> {
        self.placements.get(index)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Indices that fell back to their cell origin.
    pub fn forced_indices(&self) -> Vec<usize> {
        self.placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.forced)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of forced placements.
    pub fn forced_count(&self) -> usize {
        self.placements.iter().filter(|p| p.forced).count()
    }
}

/// Lays out a lineup. Pure apart from the random source it is handed.
#[derive(Debug, Clone)]
pub struct PlacementPlanner {
    config: PlacementConfig,
}

impl PlacementPlanner {
    /// Create a planner after validating `config`.
    pub fn new(config: PlacementConfig) -> LotteryResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The planner's configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Plan a count that arrived as a signed integer from outside.
    pub fn plan_checked(&self, count: i64, rng: &mut impl RandomSource) -> LotteryResult<Layout> {
        let count = usize::try_from(count).map_err(|_| {
            LotteryError::InvalidArgument(format!("placement count must be >= 0, got {count}"))
        })?;
        Ok(self.plan(count, rng))
    }

    /// Produce exactly `count` placements. Runs at most
    /// `count * max_attempts` samples.
    pub fn plan(&self, count: usize, rng: &mut impl RandomSource) -> Layout {
        let cfg = &self.config;
        let mut placements: Vec<Placement> = Vec::with_capacity(count);

        for (index, cell) in SpiralCells::new().take(count).enumerate() {
            let origin = Position::new(
                f64::from(cell.col) * cfg.cell_size,
                f64::from(cell.row) * cfg.cell_size,
            );

            let accepted = (0..cfg.max_attempts).find_map(|attempt| {
                let candidate = Position::new(
                    origin.x + rng.next_offset(cfg.random_offset_range),
                    origin.z + rng.next_offset(cfg.random_offset_range),
                );
                if collides(&candidate, &placements, cfg.min_distance) {
                    tracing::debug!(index, attempt, %candidate, "candidate rejected");
                    None
                } else {
                    Some(candidate)
                }
            });

            let placement = match accepted {
                Some(position) => Placement {
                    cell,
                    position,
                    rotation: position.heading() + rng.next_offset(cfg.random_rotation_range),
                    forced: false,
                },
                None => {
                    tracing::warn!(
                        index,
                        %cell,
                        attempts = cfg.max_attempts,
                        "no free spot in cell, forcing placement at cell origin"
                    );
                    Placement {
                        cell,
                        position: origin,
                        rotation: origin.heading(),
                        forced: true,
                    }
                }
            };
            placements.push(placement);
        }

        let layout = Layout { placements };
        let forced = layout.forced_count();
        if forced > 0 {
            tracing::warn!(count, forced, "layout contains forced placements");
        } else {
            tracing::debug!(count, "layout planned");
        }
        layout
    }
}

fn collides(candidate: &Position, placed: &[Placement], min_distance: f64) -> bool {
    placed
        .iter()
        .any(|p| candidate.distance(&p.position) < min_distance)
}
