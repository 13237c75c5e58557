//! Grid-based pathfinding using the A* algorithm.
//!
//! All moves cost 1 and only orthogonal steps exist, so the Manhattan
//! distance is an admissible and consistent heuristic and the first time the
//! target is popped its path is optimal. Ties are broken by a fixed total
//! order so that identical inputs always produce identical paths.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::ruleset::Ruleset;

/// Ordered sequence of tile positions.
///
/// The first element is the search origin, included even though reaching it
/// costs nothing. An empty path means "no path found"; a single-element path
/// means origin and target coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Position>);

impl Path {
    /// Wrap a sequence of positions.
    #[must_use]
    pub const fn new(tiles: Vec<Position>) -> Self {
        Self(tiles)
    }

    /// The "no path" value.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of tiles, including the origin.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves along the path (`len - 1`), or `None` if empty.
    #[must_use]
    pub fn moves(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// First tile.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.0.first().copied()
    }

    /// Last tile.
    #[must_use]
    pub fn end(&self) -> Option<Position> {
        self.0.last().copied()
    }

    /// Positions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    /// Iterate over positions.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.0.iter()
    }

    /// Unwrap into the underlying positions.
    #[must_use]
    pub fn into_vec(self) -> Vec<Position> {
        self.0
    }
}

impl From<Vec<Position>> for Path {
    fn from(tiles: Vec<Position>) -> Self {
        Self(tiles)
    }
}

impl FromIterator<Position> for Path {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-tile scratch record for one search.
#[derive(Debug, Clone, Copy, Default)]
struct Scratch {
    parent: Option<usize>,
    g_score: i32,
    h_score: i32,
    seen: bool,
    closed: bool,
}

/// Scratch state for a single A* run, indexed like the grid's tiles.
///
/// Allocated fresh for every search.
struct SearchContext {
    nodes: Vec<Scratch>,
}

impl SearchContext {
    fn new(tile_count: usize) -> Self {
        Self {
            nodes: vec![Scratch::default(); tile_count],
        }
    }

    fn reconstruct(&self, grid: &Grid, target: usize) -> Path {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(index) = current {
            path.push(grid.tile_at(index).position());
            current = self.nodes[index].parent;
        }
        path.reverse();
        Path(path)
    }
}

/// A node in the A* open set priority queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    index: usize,
    position: Position,
    f_score: i32,
    h_score: i32,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest
        // (f, h, x, y) is popped first.
        (other.f_score, other.h_score, other.position)
            .cmp(&(self.f_score, self.h_score, self.position))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a minimum-hop path from `start` to `target` under `ruleset`.
///
/// The start tile is never checked against the ruleset (the searching unit
/// usually stands on it). Returns an empty path if either endpoint is out of
/// bounds, the target cannot be passed under the ruleset, or no route exists.
#[must_use]
pub fn find_path(grid: &Grid, start: Position, target: Position, ruleset: Ruleset) -> Path {
    let (Some(start_index), Some(target_index)) = (grid.index_of(start), grid.index_of(target))
    else {
        return Path::empty();
    };

    if start_index == target_index {
        return Path(vec![start]);
    }

    if !ruleset.can_pass(grid.tile_at(target_index)) {
        tracing::trace!(%start, %target, %ruleset, "Target blocked, skipping search");
        return Path::empty();
    }

    let mut ctx = SearchContext::new(grid.tile_count());
    let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();
    let mut expanded = 0usize;

    let start_h = start.manhattan(target);
    ctx.nodes[start_index] = Scratch {
        parent: None,
        g_score: 0,
        h_score: start_h,
        seen: true,
        closed: false,
    };
    open.push(OpenNode {
        index: start_index,
        position: start,
        f_score: start_h,
        h_score: start_h,
    });

    while let Some(current) = open.pop() {
        let node = ctx.nodes[current.index];

        // Stale heap entry: the node was closed or re-queued with a better score.
        if node.closed || node.g_score + node.h_score != current.f_score {
            continue;
        }

        if current.index == target_index {
            let path = ctx.reconstruct(grid, target_index);
            tracing::debug!(
                %start,
                %target,
                %ruleset,
                expanded,
                moves = path.len() - 1,
                "Path found"
            );
            return path;
        }

        ctx.nodes[current.index].closed = true;
        expanded += 1;
        let tentative_g = node.g_score + 1;

        for &neighbor_index in grid.neighbor_indices(current.index) {
            let neighbor = &mut ctx.nodes[neighbor_index];
            if neighbor.closed {
                continue;
            }
            let tile = grid.tile_at(neighbor_index);
            if !ruleset.can_pass(tile) {
                continue;
            }
            if neighbor.seen && tentative_g >= neighbor.g_score {
                continue;
            }

            let h = tile.position().manhattan(target);
            *neighbor = Scratch {
                parent: Some(current.index),
                g_score: tentative_g,
                h_score: h,
                seen: true,
                closed: false,
            };
            open.push(OpenNode {
                index: neighbor_index,
                position: tile.position(),
                f_score: tentative_g + h,
                h_score: h,
            });
        }
    }

    tracing::debug!(%start, %target, %ruleset, expanded, "No path");
    Path::empty()
}
