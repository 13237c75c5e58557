//! # Tactics Core
//!
//! Pathfinding and range resolution for turn-based tactics on a square grid.
//!
//! This crate contains **only** deterministic query logic:
//! - No rendering
//! - No IO beyond optional config loading
//! - No hidden randomness (random tile picks take a caller-supplied RNG)
//!
//! Every search borrows the [`Grid`](grid::Grid) immutably and keeps its own
//! scratch state, so repeated queries over the same grid are independent and
//! always return the same answer.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Tiles, terrain, occupancy and adjacency
//! - [`ruleset`] - Movement vs. attack traversal rules
//! - [`pathfinding`] - A* shortest paths
//! - [`flood`] - Breadth-first reach queries
//! - [`attack`] - Attack staging search
//! - [`range`] - Budget checks and per-turn slicing
//! - [`planner`] - Multi-turn movement and attack plans
//! - [`cache`] - Version-stamped path cache
//! - [`config`] - Planner configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod attack;
pub mod cache;
pub mod config;
pub mod error;
pub mod flood;
pub mod grid;
pub mod pathfinding;
pub mod planner;
pub mod range;
pub mod ruleset;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attack::{attack_positions, find_best_attack_position};
    pub use crate::cache::{CacheStats, PathCache};
    pub use crate::config::PlannerConfig;
    pub use crate::error::{OccupancyConflict, Result, TacticsError};
    pub use crate::flood::{attack_range, movement_range, reachable_within, Reach};
    pub use crate::grid::{Grid, OccupantId, Position, TerrainType, Tile};
    pub use crate::pathfinding::{find_path, Path};
    pub use crate::planner::{AttackPlan, Planner};
    pub use crate::range::{
        clamp_to_range, is_within_range, movement_segment, remainder_beyond_range, TurnSegment,
    };
    pub use crate::ruleset::Ruleset;
}
