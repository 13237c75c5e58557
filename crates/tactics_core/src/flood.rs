//! Breadth-first flood fills under a ruleset.
//!
//! With uniform step costs BFS visits tiles in non-decreasing distance order,
//! so it answers "everything within N hops" and "closest tile matching X"
//! without a heuristic. The fill is level-synchronous: each step yields the
//! complete set of tiles at the next distance, sorted by position.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::ruleset::Ruleset;

/// A tile reached by a flood fill and its hop distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reach {
    /// Reached tile.
    pub position: Position,
    /// Hops from the origin.
    pub distance: usize,
}

/// Level-by-level BFS from a single origin.
///
/// The origin is always level 0 and is never checked against the ruleset.
pub(crate) struct Flood<'g> {
    grid: &'g Grid,
    ruleset: Ruleset,
    visited: Vec<bool>,
    frontier: Vec<usize>,
    depth: usize,
}

impl<'g> Flood<'g> {
    pub(crate) fn new(grid: &'g Grid, origin: Position, ruleset: Ruleset) -> Self {
        let mut visited = vec![false; grid.tile_count()];
        let frontier = match grid.index_of(origin) {
            Some(index) => {
                visited[index] = true;
                vec![index]
            }
            None => Vec::new(),
        };
        Self {
            grid,
            ruleset,
            visited,
            frontier,
            depth: 0,
        }
    }
}

/// One BFS level: its distance and the tile indices at that distance.
pub(crate) struct Level {
    pub(crate) distance: usize,
    pub(crate) tiles: Vec<usize>,
}

impl Iterator for Flood<'_> {
    type Item = Level;

    fn next(&mut self) -> Option<Level> {
        if self.frontier.is_empty() {
            return None;
        }

        let mut next = Vec::new();
        for &index in &self.frontier {
            for &neighbor in self.grid.neighbor_indices(index) {
                if self.visited[neighbor] || !self.ruleset.can_pass(self.grid.tile_at(neighbor)) {
                    continue;
                }
                self.visited[neighbor] = true;
                next.push(neighbor);
            }
        }
        // Row-major index order differs from (x, y) order; sort by position.
        next.sort_unstable_by_key(|&i| self.grid.tile_at(i).position());

        let level = Level {
            distance: self.depth,
            tiles: std::mem::replace(&mut self.frontier, next),
        };
        self.depth += 1;
        Some(level)
    }
}

/// Every tile within `max_distance` hops of `origin` under `ruleset`,
/// excluding the origin itself.
///
/// Results are sorted by `(distance, position)`. An out-of-bounds origin
/// reaches nothing.
#[must_use]
pub fn reachable_within(
    grid: &Grid,
    origin: Position,
    ruleset: Ruleset,
    max_distance: usize,
) -> Vec<Reach> {
    Flood::new(grid, origin, ruleset)
        .skip(1)
        .take_while(|level| level.distance <= max_distance)
        .flat_map(|level| {
            level.tiles.into_iter().map(move |index| Reach {
                position: grid.tile_at(index).position(),
                distance: level.distance,
            })
        })
        .collect()
}

/// Tiles a unit at `origin` can end a move on with `move_budget` moves.
#[must_use]
pub fn movement_range(grid: &Grid, origin: Position, move_budget: usize) -> Vec<Reach> {
    // Movement only passes through standable tiles, so every reached tile is a
    // legal destination.
    reachable_within(grid, origin, Ruleset::Movement, move_budget)
}

/// Tiles an attack from `origin` can reach within `attack_range` hops.
#[must_use]
pub fn attack_range(grid: &Grid, origin: Position, attack_range: usize) -> Vec<Reach> {
    reachable_within(grid, origin, Ruleset::Attack, attack_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TerrainType;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_levels_are_sorted_and_complete() {
        let grid = Grid::new(5, 5).unwrap();
        let levels: Vec<Level> = Flood::new(&grid, pos(2, 2), Ruleset::Movement).collect();

        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0].tiles.len(), 1);
        assert_eq!(levels[1].tiles.len(), 4);
        assert_eq!(levels[2].tiles.len(), 8);

        let level_one: Vec<Position> = levels[1]
            .tiles
            .iter()
            .map(|&i| grid.tile_at(i).position())
            .collect();
        assert_eq!(level_one, vec![pos(1, 2), pos(2, 1), pos(2, 3), pos(3, 2)]);
    }

    #[test]
    fn test_reachable_within_budget() {
        let grid = Grid::new(5, 5).unwrap();
        let reach = reachable_within(&grid, pos(0, 0), Ruleset::Movement, 2);

        assert_eq!(reach.len(), 5);
        assert!(reach.iter().all(|r| r.distance >= 1 && r.distance <= 2));
        assert_eq!(reach[0], Reach { position: pos(0, 1), distance: 1 });
        assert!(reach.iter().all(|r| r.position != pos(0, 0)));
    }

    #[test]
    fn test_reachable_respects_ruleset() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set_tile_type(pos(1, 0), TerrainType::Cover);

        assert!(reachable_within(&grid, pos(0, 0), Ruleset::Movement, 5).is_empty());

        let attack = reachable_within(&grid, pos(0, 0), Ruleset::Attack, 5);
        assert_eq!(
            attack,
            vec![
                Reach { position: pos(1, 0), distance: 1 },
                Reach { position: pos(2, 0), distance: 2 },
            ]
        );
    }

    #[test]
    fn test_movement_and_attack_range() {
        let mut grid = Grid::from_layout(
            "
            ...
            .+.
            ...
            ",
        )
        .unwrap();
        grid.set_occupant(pos(2, 0), crate::grid::OccupantId(9)).unwrap();

        let moves: Vec<Position> = movement_range(&grid, pos(0, 0), 2)
            .into_iter()
            .map(|r| r.position)
            .collect();
        assert_eq!(moves, vec![pos(0, 1), pos(1, 0), pos(0, 2)]);

        let attacks = attack_range(&grid, pos(0, 0), 2);
        assert_eq!(attacks.len(), 5);
        assert!(attacks.iter().any(|r| r.position == pos(1, 1)));
        assert!(attacks.iter().any(|r| r.position == pos(2, 0)));
    }

    #[test]
    fn test_out_of_bounds_origin() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(Flood::new(&grid, pos(9, 9), Ruleset::Movement).count(), 0);
        assert!(reachable_within(&grid, pos(9, 9), Ruleset::Attack, 3).is_empty());
    }
}
