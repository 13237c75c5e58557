//! Budget checks and slicing of existing paths.
//!
//! Budgets count moves, not tiles: a path of `n` tiles costs `n - 1`. None of
//! these functions search; they only cut paths produced elsewhere.

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::pathfinding::Path;

/// One turn's worth of movement (or a trailing attack) carved from a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSegment {
    /// Tiles covered this turn, excluding the tile the turn starts on.
    pub tiles: Path,
    /// Turn number, starting at 1.
    pub turn: u32,
}

impl TurnSegment {
    /// Tile the segment ends on.
    #[must_use]
    pub fn end(&self) -> Option<Position> {
        self.tiles.end()
    }
}

/// Returns true if the path's cost fits within `budget`. An empty path is
/// never in range.
#[must_use]
pub fn is_within_range(path: &Path, budget: usize) -> bool {
    path.moves().is_some_and(|moves| moves <= budget)
}

/// The part of the path affordable with `budget`: the origin plus up to
/// `budget` further tiles.
#[must_use]
pub fn clamp_to_range(path: &Path, budget: usize) -> Path {
    let end = path.len().min(budget.saturating_add(1));
    Path::new(path.as_slice()[..end].to_vec())
}

/// The part of the path beyond `budget`, starting at the last affordable tile
/// so that it overlaps [`clamp_to_range`] by one tile.
///
/// Empty if the whole path is affordable.
#[must_use]
pub fn remainder_beyond_range(path: &Path, budget: usize) -> Path {
    if is_within_range(path, budget) || path.is_empty() {
        return Path::empty();
    }
    Path::new(path.as_slice()[budget..].to_vec())
}

/// One turn of movement along `path`.
///
/// Without `include_start` this is up to `budget` tiles after the origin;
/// with it, the origin followed by up to `budget` tiles.
#[must_use]
pub fn movement_segment(path: &Path, budget: usize, include_start: bool) -> Path {
    let first = usize::from(!include_start);
    let end = path.len().min(budget.saturating_add(1));
    if first >= end {
        return Path::empty();
    }
    Path::new(path.as_slice()[first..end].to_vec())
}
