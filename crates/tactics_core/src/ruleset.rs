//! Traversal rulesets.
//!
//! A ruleset decides which tiles a search may route through and which tiles a
//! unit may finish on. Every search takes the ruleset as an explicit argument;
//! nothing is stored on the tiles.

use serde::{Deserialize, Serialize};

use crate::grid::{TerrainType, Tile};

/// Which kind of line a search is tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ruleset {
    /// A unit walking tile to tile.
    #[default]
    Movement,
    /// An attack reaching across tiles toward a target.
    Attack,
}

impl Ruleset {
    /// Returns true if a path under this ruleset may pass through `tile`.
    ///
    /// Movement needs open ground with nobody standing on it. Attacks travel
    /// across open ground and cover, ignoring occupants.
    #[must_use]
    pub const fn can_pass(self, tile: &Tile) -> bool {
        match self {
            Self::Movement => tile.is_occupiable(),
            Self::Attack => matches!(
                tile.terrain(),
                TerrainType::Traversable | TerrainType::Cover
            ),
        }
    }

    /// Returns true if a unit moving under this ruleset may end on `tile`.
    ///
    /// Attacks never end on a tile, so this is always false for
    /// [`Ruleset::Attack`].
    #[must_use]
    pub const fn can_enter(self, tile: &Tile) -> bool {
        match self {
            Self::Movement => tile.is_occupiable(),
            Self::Attack => false,
        }
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movement => write!(f, "movement"),
            Self::Attack => write!(f, "attack"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, OccupantId, Position};

    fn grid_with_all_terrain() -> Grid {
        let mut grid = Grid::from_layout(".#+.").unwrap();
        grid.set_occupant(Position::new(3, 0), OccupantId(1)).unwrap();
        grid
    }

    #[test]
    fn test_movement_rules() {
        let grid = grid_with_all_terrain();
        let r = Ruleset::Movement;
        let [open, wall, cover, occupied] = [0, 1, 2, 3].map(|x| grid.get_tile(x, 0).unwrap());

        assert!(r.can_pass(open) && r.can_enter(open));
        assert!(!r.can_pass(wall) && !r.can_enter(wall));
        assert!(!r.can_pass(cover) && !r.can_enter(cover));
        assert!(!r.can_pass(occupied) && !r.can_enter(occupied));
    }

    #[test]
    fn test_attack_rules() {
        let grid = grid_with_all_terrain();
        let r = Ruleset::Attack;
        let [open, wall, cover, occupied] = [0, 1, 2, 3].map(|x| grid.get_tile(x, 0).unwrap());

        assert!(r.can_pass(open));
        assert!(!r.can_pass(wall));
        assert!(r.can_pass(cover));
        assert!(r.can_pass(occupied));
        assert!([open, wall, cover, occupied].iter().all(|t| !r.can_enter(t)));
    }
}
