//! Planner configuration.
//!
//! Loaded from RON so tools and games can tune caching without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TacticsError};

/// Tunables for [`Planner`](crate::planner::Planner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Memoize A* results between topology edits.
    pub cache_enabled: bool,
    /// Entries kept before the cache is flushed.
    pub cache_capacity: usize,
    /// Hard cap on turns produced by a multi-turn plan.
    pub max_turns: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: 1024,
            max_turns: 256,
        }
    }
}

impl PlannerConfig {
    /// Parse a config from RON text. Missing fields take their defaults and
    /// out-of-range values are clamped as by the `with_*` builders.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ConfigParse`] if the text is not valid RON for
    /// this type.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str::<Self>(text)
            .map(Self::clamped)
            .map_err(|e| TacticsError::ConfigParse(e.to_string()))
    }

    /// Raise zero capacity and turn cap to 1.
    #[must_use]
    pub fn clamped(self) -> Self {
        let (capacity, max_turns) = (self.cache_capacity, self.max_turns);
        self.with_cache_capacity(capacity).with_max_turns(max_turns)
    }

    /// Load a config from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::Io`] if the file cannot be read, or
    /// [`TacticsError::ConfigParse`] if it does not parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Enable or disable path caching.
    #[must_use]
    pub const fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Set the cache capacity (at least 1).
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }

    /// Set the turn cap for multi-turn plans (at least 1).
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }
}
