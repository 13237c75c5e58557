//! Multi-turn movement and attack planning.
//!
//! The planner is the entry point for game code. It owns the path cache and
//! strings together A*, the attack staging search and path slicing:
//!
//! - [`Planner::plan_multi_turn_movement`] walks toward a target one turn at a
//!   time, re-planning from wherever the previous turn ended.
//! - [`Planner::plan_attack_approach`] attacks directly when possible and
//!   otherwise moves to the closest staging tile first.
//!
//! An attack segment never repeats the tile the movement ended on; it begins
//! with the first tile past the staging tile and shares the final movement
//! turn's number.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::attack::find_best_attack_position;
use crate::cache::{CacheStats, PathCache};
use crate::config::PlannerConfig;
use crate::grid::{Grid, Position};
use crate::pathfinding::{find_path, Path};
use crate::range::{is_within_range, movement_segment, TurnSegment};
use crate::ruleset::Ruleset;

/// Movement turns followed by the attack that ends the approach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPlan {
    /// Movement turns toward the staging tile. Empty for a direct attack.
    pub movement: Vec<TurnSegment>,
    /// The attack line from the staging tile (or the start) to the enemy.
    /// `None` when the enemy cannot be reached.
    pub attack: Option<TurnSegment>,
}

impl AttackPlan {
    /// Returns true if the plan ends in an attack.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.attack.is_some()
    }

    /// Tile the attacker ends up on, if it moves at all.
    #[must_use]
    pub fn staging_tile(&self) -> Option<Position> {
        self.movement.last().and_then(TurnSegment::end)
    }

    /// Number of turns until the attack lands.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.attack.as_ref().map_or(0, |a| a.turn)
    }
}

/// Path planner with an optional result cache.
///
/// Planning needs `&mut self` for the cache; searches only borrow the grid,
/// so the grid cannot change while a plan is being built.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    cache: PathCache,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl Planner {
    /// Create a planner with the given configuration.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        let config = config.clamped();
        let cache = PathCache::new(config.cache_capacity);
        Self { config, cache }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Cache counters.
    #[must_use]
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop all cached paths.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Shortest path under `ruleset`, served from the cache when enabled.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        target: Position,
        ruleset: Ruleset,
    ) -> Path {
        if self.config.cache_enabled {
            self.cache.find_path(grid, start, target, ruleset)
        } else {
            find_path(grid, start, target, ruleset)
        }
    }

    /// Split the walk from `start` to `target` into per-turn segments of at
    /// most `move_budget` tiles.
    ///
    /// Each turn re-plans from where the previous one ended. Planning stops
    /// when the target is reached, no path or progress remains, a turn would
    /// start on a tile some earlier turn started on, or the configured turn
    /// cap is hit. The segments gathered so far are returned in every case;
    /// an unreachable target yields an empty plan.
    pub fn plan_multi_turn_movement(
        &mut self,
        grid: &Grid,
        start: Position,
        target: Position,
        move_budget: usize,
    ) -> Vec<TurnSegment> {
        let mut segments = Vec::new();
        let mut turn_starts = HashSet::new();
        let mut current = start;
        let mut turn = 1;

        loop {
            if turn > self.config.max_turns {
                tracing::warn!(%start, %target, max_turns = self.config.max_turns, "Turn cap reached");
                break;
            }
            turn_starts.insert(current);

            let path = self.find_path(grid, current, target, Ruleset::Movement);
            if path.is_empty() {
                break;
            }
            let tiles = movement_segment(&path, move_budget, false);
            let Some(end) = tiles.end() else {
                break;
            };

            segments.push(TurnSegment { tiles, turn });
            current = end;

            if current == target {
                break;
            }
            if turn_starts.contains(&current) {
                tracing::debug!(%current, turn, "Plan revisits a turn start, stopping");
                break;
            }
            turn += 1;
        }

        tracing::debug!(
            %start,
            %target,
            move_budget,
            turns = segments.len(),
            arrived = current == target,
            "Multi-turn movement planned"
        );
        segments
    }

    /// Plan how a unit at `start` gets to attack the unit at `enemy`.
    ///
    /// If the enemy is already within `attack_range` along an attack line the
    /// plan is a single attack on turn 1 with no movement. Otherwise the unit
    /// walks to the closest staging tile over as many turns as needed and
    /// attacks on the turn it arrives. Returns an empty plan when no staging
    /// tile can be reached.
    pub fn plan_attack_approach(
        &mut self,
        grid: &Grid,
        start: Position,
        enemy: Position,
        move_budget: usize,
        attack_range: usize,
    ) -> AttackPlan {
        let direct = self.find_path(grid, start, enemy, Ruleset::Attack);
        if is_within_range(&direct, attack_range) {
            tracing::debug!(%start, %enemy, attack_range, "Enemy already in range");
            return AttackPlan {
                movement: Vec::new(),
                attack: Some(TurnSegment {
                    tiles: movement_segment(&direct, attack_range, false),
                    turn: 1,
                }),
            };
        }

        let Some(staging) = find_best_attack_position(grid, start, enemy, attack_range) else {
            return AttackPlan::default();
        };

        let movement = self.plan_multi_turn_movement(grid, start, staging, move_budget);
        let Some(last) = movement.last() else {
            return AttackPlan::default();
        };
        if last.end() != Some(staging) {
            tracing::debug!(%start, %staging, "Movement plan stopped short of staging tile");
            return AttackPlan::default();
        }
        let turn = last.turn;

        let strike = self.find_path(grid, staging, enemy, Ruleset::Attack);
        if !is_within_range(&strike, attack_range) {
            return AttackPlan::default();
        }

        AttackPlan {
            movement,
            attack: Some(TurnSegment {
                tiles: movement_segment(&strike, attack_range, false),
                turn,
            }),
        }
    }
}
