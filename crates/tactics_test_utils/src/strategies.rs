//! Proptest strategies for grids and positions.

use proptest::prelude::*;
use tactics_core::grid::{Grid, Position, TerrainType};

/// Any terrain type, weighted toward open ground so paths usually exist.
pub fn arb_terrain() -> impl Strategy<Value = TerrainType> {
    prop_oneof![
        6 => Just(TerrainType::Traversable),
        2 => Just(TerrainType::Obstacle),
        1 => Just(TerrainType::Cover),
    ]
}

/// A random grid up to `max_side` tiles on each side.
pub fn arb_grid(max_side: i32) -> impl Strategy<Value = Grid> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(width, height)| {
        proptest::collection::vec(arb_terrain(), (width * height) as usize).prop_map(
            move |terrain| {
                let mut grid = Grid::new(width, height).expect("positive dimensions");
                for (i, kind) in terrain.into_iter().enumerate() {
                    let i = i as i32;
                    grid.set_tile_type(Position::new(i % width, i / width), kind);
                }
                grid
            },
        )
    })
}

/// A random grid together with two in-bounds positions.
pub fn arb_grid_with_endpoints(max_side: i32) -> impl Strategy<Value = (Grid, Position, Position)> {
    arb_grid(max_side).prop_flat_map(|grid| {
        let (w, h) = (grid.width(), grid.height());
        (
            Just(grid),
            (0..w, 0..h).prop_map(|(x, y)| Position::new(x, y)),
            (0..w, 0..h).prop_map(|(x, y)| Position::new(x, y)),
        )
    })
}

/// A random path of adjacent positions heading right and down.
pub fn arb_path(max_len: usize) -> impl Strategy<Value = Vec<Position>> {
    proptest::collection::vec(any::<bool>(), 0..max_len).prop_map(|steps| {
        let mut current = Position::new(0, 0);
        let mut path = vec![current];
        for right in steps {
            current = if right {
                Position::new(current.x + 1, current.y)
            } else {
                Position::new(current.x, current.y + 1)
            };
            path.push(current);
        }
        path
    })
}
