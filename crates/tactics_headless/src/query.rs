//! Planner queries against a loaded scenario.
//!
//! Each query builds the scenario grid, runs through a [`Planner`] configured
//! from the scenario, and returns a serializable [`Report`].

use serde::Serialize;
use tactics_core::flood::{reachable_within, Reach};
use tactics_core::grid::Position;
use tactics_core::pathfinding::Path;
use tactics_core::planner::{AttackPlan, Planner};
use tactics_core::range::TurnSegment;
use tactics_core::ruleset::Ruleset;

use crate::scenario::{Scenario, ScenarioError};

/// A question to ask the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Shortest path between two tiles.
    Path {
        /// Start tile.
        from: Position,
        /// Target tile.
        to: Position,
        /// Traversal rules.
        ruleset: Ruleset,
    },
    /// Multi-turn movement of a unit toward a tile.
    Plan {
        /// Moving unit.
        unit: u64,
        /// Target tile.
        to: Position,
        /// Moves per turn.
        move_budget: usize,
    },
    /// Approach and attack one unit with another.
    Attack {
        /// Attacking unit.
        attacker: u64,
        /// Attacked unit.
        enemy: u64,
        /// Moves per turn.
        move_budget: usize,
        /// Attack reach in tiles.
        attack_range: usize,
    },
    /// Every tile reachable from a position within a budget.
    Reach {
        /// Origin tile.
        from: Position,
        /// Maximum hops.
        budget: usize,
        /// Traversal rules.
        ruleset: Ruleset,
    },
}

/// Outcome of a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Report {
    /// Result of [`Query::Path`].
    Path {
        /// Traversal rules used.
        ruleset: Ruleset,
        /// The path, empty if unreachable.
        path: Path,
    },
    /// Result of [`Query::Plan`].
    Plan {
        /// Per-turn movement.
        segments: Vec<TurnSegment>,
        /// Whether the last segment ends on the target.
        arrived: bool,
    },
    /// Result of [`Query::Attack`].
    Attack {
        /// Movement and attack.
        plan: AttackPlan,
    },
    /// Result of [`Query::Reach`].
    Reach {
        /// Traversal rules used.
        ruleset: Ruleset,
        /// Reached tiles with their distance.
        tiles: Vec<Reach>,
    },
}

impl Report {
    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Path { ruleset, path } => match path.moves() {
                Some(moves) => format!("{ruleset} path: {moves} moves"),
                None => format!("{ruleset} path: unreachable"),
            },
            Self::Plan { segments, arrived } => {
                let outcome = if *arrived { "arrives" } else { "does not arrive" };
                format!("movement plan: {} turns, {outcome}", segments.len())
            }
            Self::Attack { plan } => match (&plan.attack, plan.staging_tile()) {
                (None, _) => "attack plan: enemy unreachable".to_string(),
                (Some(_), None) => "attack plan: enemy already in range".to_string(),
                (Some(_), Some(staging)) => format!(
                    "attack plan: strike from {staging} on turn {}",
                    plan.turns()
                ),
            },
            Self::Reach { ruleset, tiles } => {
                format!("{ruleset} reach: {} tiles", tiles.len())
            }
        }
    }
}

/// Run a query against the scenario.
pub fn run_query(scenario: &Scenario, query: &Query) -> Result<Report, ScenarioError> {
    let grid = scenario.build_grid()?;
    let mut planner = Planner::new(scenario.planner.clone());

    let report = match *query {
        Query::Path { from, to, ruleset } => Report::Path {
            ruleset,
            path: planner.find_path(&grid, from, to, ruleset),
        },
        Query::Plan {
            unit,
            to,
            move_budget,
        } => {
            let start = scenario.unit_position(unit)?;
            let segments = planner.plan_multi_turn_movement(&grid, start, to, move_budget);
            let arrived = start == to || segments.last().and_then(TurnSegment::end) == Some(to);
            Report::Plan { segments, arrived }
        }
        Query::Attack {
            attacker,
            enemy,
            move_budget,
            attack_range,
        } => {
            let start = scenario.unit_position(attacker)?;
            let target = scenario.unit_position(enemy)?;
            Report::Attack {
                plan: planner.plan_attack_approach(
                    &grid,
                    start,
                    target,
                    move_budget,
                    attack_range,
                ),
            }
        }
        Query::Reach {
            from,
            budget,
            ruleset,
        } => Report::Reach {
            ruleset,
            tiles: reachable_within(&grid, from, ruleset, budget),
        },
    };

    tracing::info!(scenario = %scenario.name, summary = %report.summary(), "Query complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_query() {
        let report = run_query(
            &Scenario::skirmish(),
            &Query::Path {
                from: Position::new(0, 4),
                to: Position::new(11, 4),
                ruleset: Ruleset::Movement,
            },
        )
        .unwrap();
        match report {
            Report::Path { path, .. } => assert_eq!(path.moves(), Some(11)),
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_plan_query_arrives() {
        let report = run_query(
            &Scenario::skirmish(),
            &Query::Plan {
                unit: 1,
                to: Position::new(5, 0),
                move_budget: 2,
            },
        )
        .unwrap();
        assert_eq!(
            report,
            Report::Plan {
                segments: vec![
                    TurnSegment {
                        tiles: Path::new(vec![Position::new(1, 0), Position::new(2, 0)]),
                        turn: 1,
                    },
                    TurnSegment {
                        tiles: Path::new(vec![Position::new(3, 0), Position::new(4, 0)]),
                        turn: 2,
                    },
                    TurnSegment {
                        tiles: Path::new(vec![Position::new(5, 0)]),
                        turn: 3,
                    },
                ],
                arrived: true,
            }
        );
    }

    #[test]
    fn test_attack_query() {
        let report = run_query(
            &Scenario::skirmish(),
            &Query::Attack {
                attacker: 1,
                enemy: 2,
                move_budget: 4,
                attack_range: 1,
            },
        )
        .unwrap();
        let Report::Attack { plan } = report else {
            panic!("expected attack report");
        };
        assert!(plan.is_reachable());
        assert!(plan.staging_tile().unwrap().is_adjacent(Position::new(11, 7)));
        assert!(Report::Attack { plan }.summary().contains("on turn"));
    }

    #[test]
    fn test_zero_turn_cap_in_scenario_is_raised() {
        let scenario = Scenario::from_ron_str(
            r#"Scenario(name: "Cap", layout: "....", units: [(id: 1, position: (0, 0))], planner: (max_turns: 0))"#,
        )
        .unwrap();
        let report = run_query(
            &scenario,
            &Query::Plan {
                unit: 1,
                to: Position::new(3, 0),
                move_budget: 3,
            },
        )
        .unwrap();
        assert_eq!(report.summary(), "movement plan: 1 turns, arrives");
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let result = run_query(
            &Scenario::skirmish(),
            &Query::Plan {
                unit: 42,
                to: Position::new(1, 1),
                move_budget: 3,
            },
        );
        assert!(matches!(result, Err(ScenarioError::UnknownUnit(42))));
    }

    #[test]
    fn test_reach_query() {
        let report = run_query(
            &Scenario::skirmish(),
            &Query::Reach {
                from: Position::new(0, 0),
                budget: 1,
                ruleset: Ruleset::Movement,
            },
        )
        .unwrap();
        assert_eq!(report.summary(), "movement reach: 2 tiles");
    }

    #[test]
    fn test_report_json_is_tagged() {
        let report = Report::Path {
            ruleset: Ruleset::Attack,
            path: Path::new(vec![Position::new(0, 0), Position::new(1, 0)]),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["query"], "path");
        assert_eq!(json["ruleset"], "Attack");
        assert_eq!(json["path"][1]["x"], 1);
    }
}
