//! Shared code for the `gridsearch` terminal demo: argument parsing,
//! endpoint selection and frame rendering.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use clap::Parser;
use gridsearch_core::{Coord, Grid};
use gridsearch_paths::{Algorithm, SearchConfig, Snapshot};
use rand::Rng;

/// Milliseconds between frames, matching the reference animation cadence.
pub const DEFAULT_DELAY_MS: u64 = 50;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Animate an uninformed search on an 8-connected grid.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gridsearch")]
pub struct DemoArgs {
    /// Strategy: BFS, DFS, UCS, DLS, IDDFS or Bidirectional
    pub algorithm: Algorithm,

    /// Grid dimensions
    #[arg(long = "size", value_name = "RxC", value_parser = parse_size, default_value = "10x10")]
    pub grid: Grid,

    /// Start cell; random when omitted
    #[arg(long, value_name = "R,C", value_parser = parse_coord)]
    pub start: Option<Coord>,

    /// Target cell; random when omitted
    #[arg(long, value_name = "R,C", value_parser = parse_coord)]
    pub target: Option<Coord>,

    /// Depth limit for DLS (default scales with the grid)
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Delay between frames
    #[arg(long = "delay", value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Only draw the last frame
    #[arg(long = "final")]
    pub final_only: bool,
}

/// Arguments that parse but cannot drive a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    GridTooSmall(Grid),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall(g) => write!(f, "a {g} grid cannot hold two distinct endpoints"),
        }
    }
}

impl std::error::Error for DemoError {}

impl DemoArgs {
    /// Checks that hold across flags, run after parsing.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.grid.len() < 2 {
            return Err(DemoError::GridTooSmall(self.grid));
        }
        Ok(())
    }

    pub fn config(&self) -> SearchConfig {
        let config = SearchConfig::new(self.algorithm);
        match self.limit {
            Some(limit) => config.with_depth_limit(limit),
            None => config,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn parse_pair(s: &str, sep: char) -> Result<(i32, i32), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}'"))?;
    let num = |v: &str| v.trim().parse::<i32>().map_err(|e| format!("{v:?}: {e}"));
    Ok((num(a)?, num(b)?))
}

/// Parse `RxC`.
pub fn parse_size(s: &str) -> Result<Grid, String> {
    let (rows, cols) = parse_pair(s, 'x')?;
    if rows < 0 || cols < 0 {
        return Err(format!("negative grid size {rows}x{cols}"));
    }
    Ok(Grid::new(rows, cols))
}

/// Parse `row,col`.
pub fn parse_coord(s: &str) -> Result<Coord, String> {
    parse_pair(s, ',').map(Coord::from)
}

/// Fill in missing endpoints with random distinct cells.
///
/// The grid must hold at least two cells.
pub fn pick_endpoints<R: Rng>(
    grid: Grid,
    rng: &mut R,
    start: Option<Coord>,
    target: Option<Coord>,
) -> (Coord, Coord) {
    let mut random_cell = |avoid: Option<Coord>| loop {
        let c = Coord::new(
            rng.random_range(0..grid.rows()),
            rng.random_range(0..grid.cols()),
        );
        if Some(c) != avoid {
            return c;
        }
    };
    let start = start.unwrap_or_else(|| random_cell(target));
    let target = target.unwrap_or_else(|| random_cell(Some(start)));
    (start, target)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// What a cell shows in a frame, highest priority first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    Start,
    Target,
    Path,
    Explored,
    Frontier,
    Empty,
}

impl Mark {
    pub const fn glyph(self) -> char {
        match self {
            Mark::Start => 'S',
            Mark::Target => 'T',
            Mark::Path => '*',
            Mark::Explored => '.',
            Mark::Frontier => 'o',
            Mark::Empty => '·',
        }
    }
}

/// Classify every cell of `grid` for `snapshot`, row by row.
pub fn mark_frame(grid: Grid, start: Coord, target: Coord, snapshot: &Snapshot) -> Vec<Vec<Mark>> {
    let path: HashSet<Coord> = snapshot.path.iter().flatten().copied().collect();
    let explored: HashSet<Coord> = snapshot.explored.iter().copied().collect();
    let frontier: HashSet<Coord> = snapshot.frontier.iter().copied().collect();

    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| {
                    let c = Coord::new(row, col);
                    if c == start {
                        Mark::Start
                    } else if c == target {
                        Mark::Target
                    } else if path.contains(&c) {
                        Mark::Path
                    } else if explored.contains(&c) {
                        Mark::Explored
                    } else if frontier.contains(&c) {
                        Mark::Frontier
                    } else {
                        Mark::Empty
                    }
                })
                .collect()
        })
        .collect()
}

/// Plain-text rendering of a frame, one string per row.
pub fn render_frame(grid: Grid, start: Coord, target: Coord, snapshot: &Snapshot) -> Vec<String> {
    mark_frame(grid, start, target, snapshot)
        .into_iter()
        .map(|row| row.into_iter().map(Mark::glyph).collect())
        .collect()
}
