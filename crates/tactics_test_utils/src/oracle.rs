//! Brute-force reference implementations.
//!
//! Deliberately simple and slow, used to cross-check the real searches.

use std::collections::VecDeque;

use tactics_core::grid::{Grid, Position};
use tactics_core::ruleset::Ruleset;

/// True shortest hop distance from `start` to `target` under `ruleset`,
/// using the same origin-exempt passability as the real searches.
///
/// Returns `None` if the target cannot be reached.
#[must_use]
pub fn bfs_distance(grid: &Grid, start: Position, target: Position, ruleset: Ruleset) -> Option<usize> {
    let width = grid.width() as usize;
    let index = |p: Position| (p.y as usize) * width + (p.x as usize);

    grid.tile(start)?;
    if start == target {
        return Some(0);
    }

    let mut dist = vec![None; grid.tile_count()];
    dist[index(start)] = Some(0usize);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let d = dist[index(current)]?;
        for tile in grid.neighbors(current) {
            let next = tile.position();
            if dist[index(next)].is_some() || !ruleset.can_pass(tile) {
                continue;
            }
            if next == target {
                return Some(d + 1);
            }
            dist[index(next)] = Some(d + 1);
            queue.push_back(next);
        }
    }
    None
}

/// Returns true if consecutive positions are orthogonally adjacent.
#[must_use]
pub fn is_connected(path: &[Position]) -> bool {
    path.windows(2).all(|w| w[0].is_adjacent(w[1]))
}
