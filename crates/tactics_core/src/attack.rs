//! Attack staging search.
//!
//! Finds the tile an attacker should move to so that an enemy falls within
//! attack range, minimizing the attacker's movement. Two flood fills meet in
//! the middle: one from the enemy collects every tile the enemy can be
//! attacked from, the other walks outward from the attacker and stops at the
//! first distance level that touches that set.

use std::collections::HashSet;

use crate::flood::Flood;
use crate::grid::{Grid, Position};
use crate::ruleset::Ruleset;

/// Tiles from which `enemy` can be attacked within `attack_range` hops.
///
/// A candidate lies `1..=attack_range` attack-hops from the enemy and can be
/// stood on. The enemy's own tile is never a candidate.
#[must_use]
pub fn attack_positions(grid: &Grid, enemy: Position, attack_range: usize) -> HashSet<Position> {
    Flood::new(grid, enemy, Ruleset::Attack)
        .skip(1)
        .take_while(|level| level.distance <= attack_range)
        .flat_map(|level| level.tiles)
        .map(|index| grid.tile_at(index))
        .filter(|tile| Ruleset::Movement.can_enter(tile))
        .map(|tile| tile.position())
        .collect()
}

/// Nearest tile (by movement hops from `attacker`) from which `enemy` is
/// within `attack_range`.
///
/// Ties at the same movement distance go to the smallest `(x, y)`. The
/// attacker's current tile is never returned. Returns `None` when no staging
/// tile exists or none can be reached by movement.
#[must_use]
pub fn find_best_attack_position(
    grid: &Grid,
    attacker: Position,
    enemy: Position,
    attack_range: usize,
) -> Option<Position> {
    let candidates = attack_positions(grid, enemy, attack_range);
    if candidates.is_empty() {
        tracing::debug!(%enemy, attack_range, "No tile can attack enemy");
        return None;
    }

    let found = Flood::new(grid, attacker, Ruleset::Movement)
        .skip(1)
        .find_map(|level| {
            // Levels are sorted by position, so the first hit is the tie-break winner.
            level
                .tiles
                .into_iter()
                .map(|index| grid.tile_at(index).position())
                .find(|p| candidates.contains(p))
                .map(|p| (p, level.distance))
        });

    match found {
        Some((position, distance)) => {
            tracing::debug!(
                %attacker,
                %enemy,
                attack_range,
                %position,
                distance,
                candidates = candidates.len(),
                "Attack position found"
            );
            Some(position)
        }
        None => {
            tracing::debug!(%attacker, %enemy, attack_range, "No reachable attack position");
            None
        }
    }
}
