//! Scenario loading.
//!
//! A scenario is a text layout of the battlefield plus the units standing on
//! it, and optionally the planner settings to query it with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::config::PlannerConfig;
use tactics_core::error::TacticsError;
use tactics_core::grid::{Grid, OccupantId, Position};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The layout or a unit placement was rejected by the grid.
    #[error("Invalid scenario grid: {0}")]
    Grid(#[from] TacticsError),
    /// A query referred to a unit the scenario does not place.
    #[error("Unknown unit: {0}")]
    UnknownUnit(u64),
}

/// A unit standing on the map at the start of the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// Occupant id, unique within the scenario.
    pub id: u64,
    /// Tile position (x, y).
    pub position: (i32, i32),
}

impl UnitPlacement {
    /// Create a new unit placement.
    #[must_use]
    pub const fn new(id: u64, x: i32, y: i32) -> Self {
        Self {
            id,
            position: (x, y),
        }
    }

    /// Placement as a grid position.
    #[must_use]
    pub const fn tile(&self) -> Position {
        Position::new(self.position.0, self.position.1)
    }
}

/// A complete scenario description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Map rows, top row first: `.` open ground, `#` obstacle, `+` cover.
    pub layout: String,
    /// Units placed on the map.
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
    /// Planner settings for queries against this scenario.
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::skirmish()
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_ron_str(&contents)?;
        tracing::debug!(name = %scenario.name, path = %path.display(), "Scenario loaded");
        Ok(scenario)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// A two-unit skirmish on a 12x8 map with walls and a cover line.
    #[must_use]
    pub fn skirmish() -> Self {
        Self {
            name: "Skirmish".to_string(),
            description: "Two units on opposite corners of a walled field".to_string(),
            layout: [
                "............",
                "..##....##..",
                "..#......#..",
                "....++++....",
                "............",
                "..#..##..#..",
                "..##....##..",
                "............",
            ]
            .join("\n"),
            units: vec![UnitPlacement::new(1, 0, 0), UnitPlacement::new(2, 11, 7)],
            planner: PlannerConfig::default(),
        }
    }

    /// Build the grid and place every unit on it.
    pub fn build_grid(&self) -> Result<Grid, ScenarioError> {
        let mut grid = Grid::from_layout(&self.layout)?;
        for unit in &self.units {
            grid.set_occupant(unit.tile(), OccupantId(unit.id))?;
        }
        tracing::debug!(
            name = %self.name,
            width = grid.width(),
            height = grid.height(),
            units = self.units.len(),
            "Scenario grid built"
        );
        Ok(grid)
    }

    /// Starting position of the unit with the given id.
    pub fn unit_position(&self, id: u64) -> Result<Position, ScenarioError> {
        self.units
            .iter()
            .find(|unit| unit.id == id)
            .map(UnitPlacement::tile)
            .ok_or(ScenarioError::UnknownUnit(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::grid::TerrainType;

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.units.len(), 2);
        let grid = scenario.build_grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (12, 8));
        assert_eq!(grid.find_occupant(OccupantId(2)), Some(Position::new(11, 7)));
    }

    #[test]
    fn test_parse_from_ron() {
        let ron = r#"
            Scenario(
                name: "Test",
                layout: "...\n.#.\n...",
                units: [(id: 7, position: (2, 2))],
                planner: (cache_enabled: false),
            )
        "#;
        let scenario = Scenario::from_ron_str(ron).unwrap();
        assert_eq!(scenario.name, "Test");
        assert!(scenario.description.is_empty());
        assert!(!scenario.planner.cache_enabled);
        assert_eq!(scenario.unit_position(7).unwrap(), Position::new(2, 2));

        let grid = scenario.build_grid().unwrap();
        assert_eq!(grid.get_tile(1, 1).unwrap().terrain(), TerrainType::Obstacle);
    }

    #[test]
    fn test_parse_error() {
        let result = Scenario::from_ron_str("Scenario(name: )");
        assert!(matches!(result, Err(ScenarioError::ParseError(_))));
    }

    #[test]
    fn test_unit_on_obstacle_rejected() {
        let scenario = Scenario {
            layout: ".#.".to_string(),
            units: vec![UnitPlacement::new(1, 1, 0)],
            ..Scenario::default()
        };
        assert!(matches!(
            scenario.build_grid(),
            Err(ScenarioError::Grid(TacticsError::ImpossibleOccupancy { .. }))
        ));
    }

    #[test]
    fn test_unknown_unit() {
        let scenario = Scenario::default();
        assert!(matches!(
            scenario.unit_position(99),
            Err(ScenarioError::UnknownUnit(99))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Scenario::load("/nonexistent/scenario.ron");
        assert!(matches!(result, Err(ScenarioError::FileNotFound(_))));
    }
}
