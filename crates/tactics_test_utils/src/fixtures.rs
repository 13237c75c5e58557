//! Test fixtures and helpers.
//!
//! Pre-built grids for consistent testing.

use tactics_core::grid::{Grid, OccupantId, Position, TerrainType};

/// Shorthand for a position.
#[must_use]
pub const fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Build a grid from a text layout (`.` open, `#` obstacle, `+` cover).
///
/// # Panics
///
/// Panics if the layout is malformed. Only for tests.
#[must_use]
pub fn grid_from_layout(layout: &str) -> Grid {
    Grid::from_layout(layout).expect("fixture layout must be valid")
}

/// An open grid with every tile traversable.
///
/// # Panics
///
/// Panics on non-positive dimensions.
#[must_use]
pub fn open_grid(width: i32, height: i32) -> Grid {
    Grid::new(width, height).expect("fixture dimensions must be positive")
}

/// A one-tile-high corridor of the given length.
#[must_use]
pub fn corridor(len: i32) -> Grid {
    open_grid(len, 1)
}

/// An open grid with a full horizontal line of `terrain` at row `y`.
#[must_use]
pub fn walled_grid(width: i32, height: i32, y: i32, terrain: TerrainType) -> Grid {
    let mut grid = open_grid(width, height);
    for x in 0..width {
        grid.set_tile_type(pos(x, y), terrain);
    }
    grid
}

/// Place numbered occupants on the given positions, starting at id 1.
///
/// # Panics
///
/// Panics if any placement is rejected.
pub fn place_units(grid: &mut Grid, positions: &[Position]) {
    for (i, &p) in positions.iter().enumerate() {
        grid.set_occupant(p, OccupantId(i as u64 + 1))
            .expect("fixture unit placement must be valid");
    }
}

/// A 12x8 skirmish map with walls, a cover line and a chokepoint.
#[must_use]
pub fn skirmish_map() -> Grid {
    grid_from_layout(
        "
        ............
        ..##....##..
        ..#......#..
        ....++++....
        ............
        ..#..##..#..
        ..##....##..
        ............
        ",
    )
}
