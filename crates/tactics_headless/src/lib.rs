//! Headless planner runner.
//!
//! Loads a battlefield scenario from RON and answers planner queries about it
//! from the command line. Results go to stdout as ASCII art or JSON; logs go
//! to stderr.
//!
//! # Example
//!
//! ```bash
//! # Shortest movement path between two tiles
//! cargo run -p tactics_headless -- path --scenario scenarios/skirmish.ron --from 0,0 --to 11,7
//!
//! # Turn-by-turn approach and attack, as JSON
//! cargo run -p tactics_headless -- --json attack --scenario scenarios/skirmish.ron \
//!     --attacker 1 --enemy 2 --budget 4 --range 2
//! ```

pub mod query;
pub mod render;
pub mod scenario;

pub use query::{run_query, Query, Report};
pub use render::{render_grid, Overlay, RenderConfig};
pub use scenario::{Scenario, ScenarioError, UnitPlacement};

use tactics_core::grid::Position;

/// Parse a position written as `x,y`.
pub fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))
    };
    Ok(Position::new(parse(x)?, parse(y)?))
}
