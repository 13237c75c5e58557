//! Tile grid with terrain, occupancy and cached orthogonal adjacency.
//!
//! The grid is the only owner of tile state. Searches borrow it immutably and
//! keep their scratch data elsewhere, so a grid can be shared by any number of
//! concurrent read-only queries. Every grid and every mutation takes a fresh
//! [`Grid::version`] from a process-wide counter, so two grids never share a
//! stamp unless one is an unmodified clone of the other. Path caches rely on
//! this to detect stale entries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{OccupancyConflict, Result, TacticsError};

/// Integer tile coordinate.
///
/// Ordering is lexicographic on `(x, y)`, which is the coordinate tie-break
/// used by every search in this crate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance to another position.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Returns true if `other` differs by exactly one unit on exactly one axis.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }

    #[inline]
    const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Terrain semantics of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainType {
    /// Open ground: can be walked through, stood on and attacked across.
    #[default]
    Traversable,
    /// Blocks movement and attacks.
    Obstacle,
    /// Blocks movement and standing, but attacks pass across it.
    Cover,
}

impl TerrainType {
    /// Layout glyph for this terrain.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Traversable => '.',
            Self::Obstacle => '#',
            Self::Cover => '+',
        }
    }

    /// Parse a layout glyph.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Traversable),
            '#' => Some(Self::Obstacle),
            '+' => Some(Self::Cover),
            _ => None,
        }
    }
}

/// Handle to an external entity standing on a tile.
///
/// The tile only records the handle; the entity's lifetime is managed by
/// whoever placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(pub u64);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "occupant#{}", self.0)
    }
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    terrain: TerrainType,
    occupant: Option<OccupantId>,
}

impl Tile {
    const fn new(position: Position, terrain: TerrainType) -> Self {
        Self {
            position,
            terrain,
            occupant: None,
        }
    }

    /// Tile coordinates.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Terrain type.
    #[must_use]
    pub const fn terrain(&self) -> TerrainType {
        self.terrain
    }

    /// Entity currently standing here, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<OccupantId> {
        self.occupant
    }

    /// Returns true if an entity stands here.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns true if a unit could end its move here.
    #[must_use]
    pub const fn is_occupiable(&self) -> bool {
        matches!(self.terrain, TerrainType::Traversable) && self.occupant.is_none()
    }
}

/// Source of topology version stamps.
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Orthogonal neighbor offsets, in adjacency order: +x, -x, +y, -y.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Dense row-major tile grid.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    /// Neighbor tile indices, one list per tile.
    adjacency: Vec<Vec<usize>>,
    /// Replaced by every terrain, occupancy or size change.
    version: u64,
}

impl Grid {
    /// Create a grid with every tile traversable.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::InvalidDimensions`] if `width` or `height` is
    /// not positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        validate_dimensions(width, height)?;

        let mut grid = Self {
            width,
            height,
            tiles: build_tiles(width, height, |_| TerrainType::Traversable),
            adjacency: Vec::new(),
            version: next_version(),
        };
        grid.rebuild_adjacency();
        Ok(grid)
    }

    /// Build a grid from a text layout.
    ///
    /// Each non-blank line is one row, top row first (`y = 0`). Glyphs are
    /// `.` traversable, `#` obstacle and `+` cover. Surrounding whitespace on
    /// each line is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::InvalidLayout`] for empty input, ragged rows or
    /// unknown glyphs.
    pub fn from_layout(layout: &str) -> Result<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(TacticsError::InvalidLayout {
                row: 0,
                message: "layout has no rows".into(),
            });
        };
        let width = first.chars().count();

        let mut terrain = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(TacticsError::InvalidLayout {
                    row,
                    message: format!("expected {width} columns, found {}", line.chars().count()),
                });
            }
            for glyph in line.chars() {
                let tile = TerrainType::from_glyph(glyph).ok_or_else(|| {
                    TacticsError::InvalidLayout {
                        row,
                        message: format!("unknown glyph '{glyph}'"),
                    }
                })?;
                terrain.push(tile);
            }
        }

        let mut grid = Self::new(width as i32, rows.len() as i32)?;
        for (tile, kind) in grid.tiles.iter_mut().zip(terrain) {
            tile.terrain = kind;
        }
        grid.version = next_version();
        Ok(grid)
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Topology version stamp, unique across grids.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Check if a position lies within the grid.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Convert a position to a tile index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn tile_at(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    #[inline]
    pub(crate) fn neighbor_indices(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Get the tile at `(x, y)`. Returns `None` if out of bounds.
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile(Position::new(x, y))
    }

    /// Get the tile at a position. Returns `None` if out of bounds.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Orthogonal in-bounds neighbors of a position, regardless of terrain.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = &Tile> {
        let indices: &[usize] = match self.index_of(pos) {
            Some(i) => &self.adjacency[i],
            None => &[],
        };
        indices.iter().map(move |&i| &self.tiles[i])
    }

    /// Set the terrain of a tile.
    ///
    /// Returns `false` (and changes nothing) if out of bounds. Adjacency is
    /// positional, so no rebuild is needed.
    pub fn set_tile_type(&mut self, pos: Position, terrain: TerrainType) -> bool {
        let Some(index) = self.index_of(pos) else {
            return false;
        };
        if self.tiles[index].terrain != terrain {
            self.tiles[index].terrain = terrain;
            self.version = next_version();
        }
        true
    }

    /// Place an occupant on a tile.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ImpossibleOccupancy`] if the tile does not
    /// exist, is not traversable, or is already occupied. Occupancy is left
    /// unchanged in that case.
    pub fn set_occupant(&mut self, pos: Position, occupant: OccupantId) -> Result<()> {
        let reject = |conflict| TacticsError::ImpossibleOccupancy {
            occupant,
            position: pos,
            conflict,
        };

        let index = self
            .index_of(pos)
            .ok_or_else(|| reject(OccupancyConflict::OutOfBounds))?;
        let tile = &mut self.tiles[index];

        if let Some(existing) = tile.occupant {
            return Err(reject(OccupancyConflict::Occupied(existing)));
        }
        if tile.terrain != TerrainType::Traversable {
            return Err(reject(OccupancyConflict::Terrain(tile.terrain)));
        }

        tile.occupant = Some(occupant);
        self.version = next_version();
        Ok(())
    }

    /// Remove and return the occupant of a tile.
    pub fn clear_occupant(&mut self, pos: Position) -> Option<OccupantId> {
        let index = self.index_of(pos)?;
        let previous = self.tiles[index].occupant.take();
        if previous.is_some() {
            self.version = next_version();
        }
        previous
    }

    /// Find where an occupant stands.
    #[must_use]
    pub fn find_occupant(&self, occupant: OccupantId) -> Option<Position> {
        self.tiles
            .iter()
            .find(|t| t.occupant == Some(occupant))
            .map(Tile::position)
    }

    /// Resize the grid.
    ///
    /// Tiles inside both the old and new bounds keep their terrain; new tiles
    /// are traversable. Occupants are dropped and must be re-placed by the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::InvalidDimensions`] if either dimension is not
    /// positive. The grid is unchanged in that case.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        validate_dimensions(width, height)?;

        let old = std::mem::take(&mut self.tiles);
        let (old_width, old_height) = (self.width, self.height);
        self.tiles = build_tiles(width, height, |pos| {
            if pos.x < old_width && pos.y < old_height {
                old[(pos.y as usize) * (old_width as usize) + (pos.x as usize)].terrain
            } else {
                TerrainType::Traversable
            }
        });
        self.width = width;
        self.height = height;
        self.version = next_version();
        self.rebuild_adjacency();

        tracing::debug!(
            from_width = old_width,
            from_height = old_height,
            width,
            height,
            "Grid resized"
        );
        Ok(())
    }

    /// Pick a uniformly random traversable, unoccupied tile.
    pub fn random_traversable_tile<R: Rng>(&self, rng: &mut R) -> Option<&Tile> {
        let candidates: Vec<&Tile> = self.tiles.iter().filter(|t| t.is_occupiable()).collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }

    fn rebuild_adjacency(&mut self) {
        let adjacency = self
            .tiles
            .iter()
            .map(|tile| {
                DIRECTIONS
                    .iter()
                    .filter_map(|&(dx, dy)| self.index_of(tile.position.offset(dx, dy)))
                    .collect()
            })
            .collect();
        self.adjacency = adjacency;
    }
}

fn validate_dimensions(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(TacticsError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn build_tiles(width: i32, height: i32, terrain: impl Fn(Position) -> TerrainType) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let pos = Position::new(x, y);
            tiles.push(Tile::new(pos, terrain(pos)));
        }
    }
    tiles
}
