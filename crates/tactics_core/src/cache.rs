//! Memoization of A* results.
//!
//! Entries are only valid for the grid version they were computed against.
//! Querying with a different version drops everything; there is no
//! time-based expiry.

use std::collections::HashMap;

use crate::grid::{Grid, Position};
use crate::pathfinding::{find_path, Path};
use crate::ruleset::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    start: Position,
    target: Position,
    ruleset: Ruleset,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran a search.
    pub misses: u64,
    /// Times the cache was flushed (version change, capacity or explicit).
    pub flushes: u64,
}

/// Path cache keyed on `(start, target, ruleset, grid version)`.
#[derive(Debug, Clone)]
pub struct PathCache {
    entries: HashMap<CacheKey, Path>,
    version: Option<u64>,
    capacity: usize,
    stats: CacheStats,
}

impl PathCache {
    /// Create an empty cache holding at most `capacity` paths.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            version: None,
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters since creation.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            self.stats.flushes += 1;
        }
        self.entries.clear();
        self.version = None;
    }

    /// Return the cached path or run A* and remember the result.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        target: Position,
        ruleset: Ruleset,
    ) -> Path {
        if self.version != Some(grid.version()) {
            if self.version.is_some() {
                tracing::debug!(
                    from = ?self.version,
                    to = grid.version(),
                    entries = self.entries.len(),
                    "Grid changed, flushing path cache"
                );
            }
            self.invalidate();
            self.version = Some(grid.version());
        }

        let key = CacheKey {
            start,
            target,
            ruleset,
        };
        if let Some(path) = self.entries.get(&key) {
            self.stats.hits += 1;
            return path.clone();
        }

        self.stats.misses += 1;
        let path = find_path(grid, start, target, ruleset);
        if self.entries.len() >= self.capacity {
            self.entries.clear();
            self.stats.flushes += 1;
        }
        self.entries.insert(key, path.clone());
        path
    }
}
