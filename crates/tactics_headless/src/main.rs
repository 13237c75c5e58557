//! Headless planner runner.
//!
//! # Usage
//!
//! ```bash
//! # Print the scenario map
//! cargo run -p tactics_headless -- show --scenario scenarios/skirmish.ron
//!
//! # Multi-turn movement of unit 1 toward a tile
//! cargo run -p tactics_headless -- plan --scenario scenarios/skirmish.ron --unit 1 --to 11,0 --budget 3
//!
//! # Reach of an attack from a tile
//! cargo run -p tactics_headless -- reach --from 5,4 --budget 3 --ruleset attack
//! ```
//!
//! Without `--scenario` the built-in skirmish map is used.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tactics_core::prelude::{Position, Ruleset};
use tactics_headless::{
    parse_position, render_grid, run_query, Overlay, Query, RenderConfig, Report, Scenario,
};

#[derive(Parser)]
#[command(name = "tactics_headless")]
#[command(about = "Headless grid tactics planner")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON instead of ASCII
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Scenario file to load (defaults to the built-in skirmish)
    #[arg(short, long, global = true)]
    scenario: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Subcommand)]
enum Commands {
    /// Print the scenario map
    Show,

    /// Shortest path between two tiles
    Path {
        /// Start tile as x,y
        #[arg(long, value_parser = parse_position)]
        from: Position,

        /// Target tile as x,y
        #[arg(long, value_parser = parse_position)]
        to: Position,

        /// Traversal rules
        #[arg(short, long, value_enum, default_value = "movement")]
        ruleset: RulesetArg,
    },

    /// Multi-turn movement of a unit toward a tile
    Plan {
        /// Moving unit id
        #[arg(short, long)]
        unit: u64,

        /// Target tile as x,y
        #[arg(long, value_parser = parse_position)]
        to: Position,

        /// Moves per turn
        #[arg(short, long, default_value = "4")]
        budget: usize,
    },

    /// Approach and attack one unit with another
    Attack {
        /// Attacking unit id
        #[arg(short, long)]
        attacker: u64,

        /// Attacked unit id
        #[arg(short, long)]
        enemy: u64,

        /// Moves per turn
        #[arg(short, long, default_value = "4")]
        budget: usize,

        /// Attack range in tiles
        #[arg(short, long, default_value = "1")]
        range: usize,
    },

    /// Tiles reachable from a position
    Reach {
        /// Origin tile as x,y
        #[arg(long, value_parser = parse_position)]
        from: Position,

        /// Maximum hops
        #[arg(short, long, default_value = "4")]
        budget: usize,

        /// Traversal rules
        #[arg(short, long, value_enum, default_value = "movement")]
        ruleset: RulesetArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RulesetArg {
    Movement,
    Attack,
}

impl From<RulesetArg> for Ruleset {
    fn from(arg: RulesetArg) -> Self {
        match arg {
            RulesetArg::Movement => Self::Movement,
            RulesetArg::Attack => Self::Attack,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for results)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let scenario = match &cli.scenario {
        Some(path) => match Scenario::load(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Failed to load scenario");
                eprintln!("FATAL: {e}");
                std::process::exit(1);
            }
        },
        None => Scenario::skirmish(),
    };

    let query = match cli.command {
        Commands::Show => {
            cmd_show(&scenario, &cli);
            return;
        }
        Commands::Path { from, to, ruleset } => Query::Path {
            from,
            to,
            ruleset: ruleset.into(),
        },
        Commands::Plan { unit, to, budget } => Query::Plan {
            unit,
            to,
            move_budget: budget,
        },
        Commands::Attack {
            attacker,
            enemy,
            budget,
            range,
        } => Query::Attack {
            attacker,
            enemy,
            move_budget: budget,
            attack_range: range,
        },
        Commands::Reach {
            from,
            budget,
            ruleset,
        } => Query::Reach {
            from,
            budget,
            ruleset: ruleset.into(),
        },
    };

    match run_query(&scenario, &query) {
        Ok(report) => print_report(&scenario, &report, &cli),
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    }
}

/// Print the scenario map without any query overlay.
fn cmd_show(scenario: &Scenario, cli: &Cli) {
    let grid = match scenario.build_grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    if cli.json {
        let summary = serde_json::json!({
            "name": scenario.name,
            "description": scenario.description,
            "width": grid.width(),
            "height": grid.height(),
            "units": scenario.units,
        });
        println!("{summary}");
        return;
    }

    let config = render_config(cli);
    print!("{}", render_grid(&grid, &Overlay::new(), &scenario.name, &config));
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }
}

fn print_report(scenario: &Scenario, report: &Report, cli: &Cli) {
    if cli.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("FATAL: Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Ok(grid) = scenario.build_grid() {
        let overlay = Overlay::from_report(report);
        print!("{}", render_grid(&grid, &overlay, &scenario.name, &render_config(cli)));
    }
    println!("{}", report.summary());
}

fn render_config(cli: &Cli) -> RenderConfig {
    RenderConfig {
        use_color: !cli.no_color,
        show_legend: true,
    }
}
