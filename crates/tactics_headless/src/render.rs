//! ASCII rendering of a grid with planner results drawn on top.

use std::collections::HashMap;

use tactics_core::grid::{Grid, Position, TerrainType};
use tactics_core::range::TurnSegment;
use tactics_core::ruleset::Ruleset;

use crate::query::Report;

/// ASCII rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Use colored output (ANSI).
    pub use_color: bool,
    /// Show the symbol legend under the map.
    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_legend: true,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
}

/// What a marked tile represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Tile on a plain path.
    Path,
    /// Last tile of a movement turn.
    TurnEnd(u32),
    /// Tile crossed by the attack line.
    Attack,
    /// Tile within reach.
    Reach(usize),
}

impl Mark {
    fn glyph(self) -> char {
        match self {
            Self::Path => '*',
            Self::TurnEnd(turn) => char::from_digit(turn % 10, 10).unwrap_or('*'),
            Self::Attack => 'x',
            Self::Reach(distance) => u32::try_from(distance % 10)
                .ok()
                .and_then(|d| char::from_digit(d, 10))
                .unwrap_or('~'),
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Path => colors::CYAN,
            Self::TurnEnd(_) => colors::GREEN,
            Self::Attack => colors::RED,
            Self::Reach(_) => colors::YELLOW,
        }
    }
}

/// Tiles to draw over the terrain, keyed by position.
///
/// Later marks replace earlier ones on the same tile.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    marks: HashMap<Position, Mark>,
}

impl Overlay {
    /// Empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay showing a planner report.
    #[must_use]
    pub fn from_report(report: &Report) -> Self {
        let mut overlay = Self::new();
        match report {
            Report::Path { ruleset, path } => {
                let mark = match ruleset {
                    Ruleset::Movement => Mark::Path,
                    Ruleset::Attack => Mark::Attack,
                };
                // The start tile keeps its own glyph.
                overlay.extend(path.iter().skip(1), mark);
            }
            Report::Plan { segments, .. } => overlay.add_segments(segments),
            Report::Attack { plan } => {
                overlay.add_segments(&plan.movement);
                if let Some(attack) = &plan.attack {
                    overlay.extend(attack.tiles.iter(), Mark::Attack);
                }
            }
            Report::Reach { tiles, .. } => {
                for reach in tiles {
                    overlay.marks.insert(reach.position, Mark::Reach(reach.distance));
                }
            }
        }
        overlay
    }

    /// Number of marked tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns true if nothing is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Mark movement turns: intermediate tiles as path, each turn's end with
    /// its turn number.
    pub fn add_segments(&mut self, segments: &[TurnSegment]) {
        for segment in segments {
            self.extend(segment.tiles.iter(), Mark::Path);
            if let Some(end) = segment.end() {
                self.marks.insert(end, Mark::TurnEnd(segment.turn));
            }
        }
    }

    fn extend<'a>(&mut self, tiles: impl IntoIterator<Item = &'a Position>, mark: Mark) {
        for &position in tiles {
            self.marks.insert(position, mark);
        }
    }

    fn get(&self, position: Position) -> Option<Mark> {
        self.marks.get(&position).copied()
    }
}

/// Top frame line, `width` wide between the corners, with the title inset.
///
/// Titles wider than the map are cut off.
fn top_border(title: &str, width: usize) -> String {
    let label: String = format!(" {title} ").chars().take(width).collect();
    let fill = width - label.chars().count();
    let lead = fill.min(2);
    format!("╔{}{label}{}╗", "═".repeat(lead), "═".repeat(fill - lead))
}

/// Render the grid as ASCII art with the overlay drawn on top.
///
/// Terrain uses its layout glyph, occupants show as `@`.
#[must_use]
pub fn render_grid(grid: &Grid, overlay: &Overlay, title: &str, config: &RenderConfig) -> String {
    let width = usize::try_from(grid.width()).unwrap_or(0);
    let (bold, reset) = if config.use_color {
        (colors::BOLD, colors::RESET)
    } else {
        ("", "")
    };
    let mut output = String::new();

    output.push_str(&format!("{bold}{}{reset}\n", top_border(title, width)));

    for y in 0..grid.height() {
        output.push('║');
        for x in 0..grid.width() {
            let Some(tile) = grid.get_tile(x, y) else {
                continue;
            };
            let (ch, color) = match overlay.get(tile.position()) {
                Some(mark) => (mark.glyph(), mark.color()),
                None if tile.is_occupied() => ('@', colors::BOLD),
                None if tile.terrain() == TerrainType::Obstacle => ('#', colors::DIM),
                None => (tile.terrain().glyph(), ""),
            };
            if config.use_color && !color.is_empty() {
                output.push_str(color);
                output.push(ch);
                output.push_str(colors::RESET);
            } else {
                output.push(ch);
            }
        }
        output.push_str("║\n");
    }

    output.push('╚');
    output.push_str(&"═".repeat(width));
    output.push_str("╝\n");

    if config.show_legend {
        output.push_str(". open  # obstacle  + cover  @ unit  * path  1-9 turn end  x attack\n");
    }

    output
}
