//! Strategy selection: [`Algorithm`], [`SearchRequest`], [`SearchConfig`]
//! and the [`Search`] dispatcher.

use std::fmt;
use std::str::FromStr;

use gridsearch_core::{Coord, Grid};

use crate::bfs::BreadthFirst;
use crate::bidirectional::Bidirectional;
use crate::dfs::DepthFirst;
use crate::dls::DepthLimited;
use crate::iddfs::IterativeDeepening;
use crate::snapshot::Snapshot;
use crate::ucs::UniformCost;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Identifier of one of the six search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls,
        Algorithm::Iddfs,
        Algorithm::Bidirectional,
    ];

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Dls => "DLS",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::Bidirectional => "Bidirectional",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`Algorithm`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected BFS, DFS, UCS, DLS, IDDFS or Bidirectional)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "ucs" => Ok(Algorithm::Ucs),
            "dls" => Ok(Algorithm::Dls),
            "iddfs" => Ok(Algorithm::Iddfs),
            "bidirectional" | "bidi" => Ok(Algorithm::Bidirectional),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchRequest
// ---------------------------------------------------------------------------

/// Which endpoint of a request is at fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Reasons a [`SearchRequest`] is unfit to be searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The grid has no cells.
    EmptyGrid,
    /// An endpoint lies outside the grid.
    OutOfBounds {
        which: Endpoint,
        coord: Coord,
        grid: Grid,
    },
    /// Start and target are the same cell.
    SameEndpoints(Coord),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::OutOfBounds { which, coord, grid } => {
                write!(f, "{which} {coord} is outside the {grid} grid")
            }
            Self::SameEndpoints(c) => write!(f, "start and target are both {c}"),
        }
    }
}

impl std::error::Error for RequestError {}

/// The inputs of one search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    pub grid: Grid,
    pub start: Coord,
    pub target: Coord,
}

impl SearchRequest {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        Self {
            grid,
            start,
            target,
        }
    }

    /// Check the preconditions every strategy assumes: both endpoints in
    /// bounds and distinct.
    ///
    /// Strategies never call this themselves; it is up to the caller.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.grid.is_empty() {
            return Err(RequestError::EmptyGrid);
        }
        for (which, coord) in [(Endpoint::Start, self.start), (Endpoint::Target, self.target)] {
            if !self.grid.contains(coord) {
                return Err(RequestError::OutOfBounds {
                    which,
                    coord,
                    grid: self.grid,
                });
            }
        }
        if self.start == self.target {
            return Err(RequestError::SameEndpoints(self.start));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Default depth limit for [`Algorithm::Dls`]: scales with the grid, giving
/// 15 on a 10×10 grid and 25 on a 20×20 grid.
pub fn default_depth_limit(grid: Grid) -> u32 {
    grid.rows().max(grid.cols()).max(0) as u32 + 5
}

/// Strategy selection plus its tuning knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Depth limit for [`Algorithm::Dls`]; `None` uses
    /// [`default_depth_limit`]. Ignored by the other strategies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth_limit: Option<u32>,
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            depth_limit: None,
        }
    }

    pub fn with_depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    pub fn effective_depth_limit(&self, grid: Grid) -> u32 {
        self.depth_limit.unwrap_or_else(|| default_depth_limit(grid))
    }

    /// Start a search for `req` with this configuration.
    pub fn start(&self, req: SearchRequest) -> Search {
        let SearchRequest {
            grid,
            start,
            target,
        } = req;
        match self.algorithm {
            Algorithm::Bfs => Search::Bfs(BreadthFirst::new(grid, start, target)),
            Algorithm::Dfs => Search::Dfs(DepthFirst::new(grid, start, target)),
            Algorithm::Ucs => Search::Ucs(UniformCost::new(grid, start, target)),
            Algorithm::Dls => Search::Dls {
                attempt: DepthLimited::new(grid, start, target, self.effective_depth_limit(grid)),
                reported: false,
            },
            Algorithm::Iddfs => Search::Iddfs(IterativeDeepening::new(grid, start, target)),
            Algorithm::Bidirectional => {
                Search::Bidirectional(Bidirectional::new(grid, start, target))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A running search of any strategy, yielding [`Snapshot`]s.
///
/// Dropping it at any point cancels the run; nothing is shared with other
/// runs.
#[derive(Clone, Debug)]
pub enum Search {
    Bfs(BreadthFirst),
    Dfs(DepthFirst),
    Ucs(UniformCost),
    /// A successful depth-limited attempt is reported as a terminal
    /// snapshot once its stack work is done.
    Dls {
        attempt: DepthLimited,
        reported: bool,
    },
    Iddfs(IterativeDeepening),
    Bidirectional(Bidirectional),
}

impl Search {
    /// Start `algorithm` on `req`, using the default DLS depth limit.
    pub fn new(algorithm: Algorithm, req: SearchRequest) -> Self {
        SearchConfig::new(algorithm).start(req)
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Search::Bfs(_) => Algorithm::Bfs,
            Search::Dfs(_) => Algorithm::Dfs,
            Search::Ucs(_) => Algorithm::Ucs,
            Search::Dls { .. } => Algorithm::Dls,
            Search::Iddfs(_) => Algorithm::Iddfs,
            Search::Bidirectional(_) => Algorithm::Bidirectional,
        }
    }

    /// Drain the stream, keeping only the outcome.
    pub fn run(self) -> Report {
        let mut report = Report::default();
        for snapshot in self {
            report.steps += 1;
            report.explored = snapshot.explored.len();
            if snapshot.path.is_some() {
                report.path = snapshot.path;
            }
        }
        report
    }
}

impl Iterator for Search {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        match self {
            Search::Bfs(s) => s.next(),
            Search::Dfs(s) => s.next(),
            Search::Ucs(s) => s.next(),
            Search::Dls { attempt, reported } => {
                if let Some(snapshot) = attempt.next() {
                    return Some(snapshot);
                }
                if *reported {
                    return None;
                }
                *reported = true;
                let outcome = attempt.outcome().filter(|o| o.found)?;
                Some(Snapshot::found(outcome.path, outcome.explored.as_slice()))
            }
            Search::Iddfs(s) => s.next(),
            Search::Bidirectional(s) => s.next(),
        }
    }
}

impl std::iter::FusedIterator for Search {}

/// Summary of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of snapshots produced, terminal one included.
    pub steps: usize,
    /// Size of the explored set in the last snapshot.
    pub explored: usize,
    /// The path, if the target was reached.
    pub path: Option<Vec<Coord>>,
}

impl Report {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Cost, path_cost};
    use crate::explored::Explored;
    use crate::reconstruct::is_valid_path;

    fn req(rows: i32, cols: i32, s: (i32, i32), t: (i32, i32)) -> SearchRequest {
        SearchRequest::new(Grid::new(rows, cols), Coord::from(s), Coord::from(t))
    }

    #[test]
    fn parse_algorithm_names() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
            assert_eq!(a.to_string().to_lowercase().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!(" bidi ".parse::<Algorithm>(), Ok(Algorithm::Bidirectional));
        let err = "astar".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, ParseAlgorithmError("astar".into()));
        assert_eq!(
            err.to_string(),
            "unknown algorithm \"astar\" (expected BFS, DFS, UCS, DLS, IDDFS or Bidirectional)"
        );
    }

    #[test]
    fn validation() {
        assert_eq!(req(10, 10, (0, 0), (0, 2)).validate(), Ok(()));
        assert_eq!(
            req(10, 10, (3, 3), (3, 3)).validate(),
            Err(RequestError::SameEndpoints(Coord::new(3, 3)))
        );
        assert_eq!(
            req(10, 10, (0, 0), (10, 0)).validate(),
            Err(RequestError::OutOfBounds {
                which: Endpoint::Target,
                coord: Coord::new(10, 0),
                grid: Grid::new(10, 10),
            })
        );
        assert!(matches!(
            req(10, 10, (-1, 0), (0, 0)).validate(),
            Err(RequestError::OutOfBounds {
                which: Endpoint::Start,
                ..
            })
        ));
        assert_eq!(req(0, 5, (0, 0), (0, 1)).validate(), Err(RequestError::EmptyGrid));
    }

    #[test]
    fn request_error_messages() {
        let err = req(10, 10, (0, 0), (10, 0)).validate().unwrap_err();
        assert_eq!(err.to_string(), "target (10, 0) is outside the 10x10 grid");
    }

    #[test]
    fn default_limits_scale_with_grid() {
        assert_eq!(default_depth_limit(Grid::new(10, 10)), 15);
        assert_eq!(default_depth_limit(Grid::new(20, 20)), 25);
        let cfg = SearchConfig::new(Algorithm::Dls);
        assert_eq!(cfg.effective_depth_limit(Grid::new(10, 10)), 15);
        assert_eq!(cfg.with_depth_limit(3).effective_depth_limit(Grid::new(10, 10)), 3);
    }

    #[test]
    fn every_algorithm_finds_a_valid_path() {
        let r = req(10, 10, (0, 0), (9, 9));
        for a in Algorithm::ALL {
            let search = SearchConfig::new(a).with_depth_limit(18).start(r);
            assert_eq!(search.algorithm(), a);
            let report = search.run();
            let path = report.path.unwrap_or_else(|| panic!("{a} found no path"));
            assert!(is_valid_path(r.grid, &path, r.start, r.target), "{a}");
        }
    }

    #[test]
    fn exactly_one_terminal_snapshot_and_it_is_last() {
        let r = req(6, 7, (5, 1), (0, 4));
        for a in Algorithm::ALL {
            let frames: Vec<_> = Search::new(a, r).collect();
            let terminals = frames.iter().filter(|f| f.is_terminal()).count();
            assert_eq!(terminals, 1, "{a}");
            assert!(frames.last().unwrap().is_terminal(), "{a}");
        }
    }

    #[test]
    fn dls_with_too_small_limit_reports_nothing() {
        let r = req(10, 10, (0, 0), (9, 9));
        let frames: Vec<_> = SearchConfig::new(Algorithm::Dls)
            .with_depth_limit(15)
            .start(r)
            .collect();
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| !f.is_terminal()));
    }

    #[test]
    fn dls_default_limit_on_10x10() {
        // Default limit 15 is too shallow for the clockwise-first traversal
        // to reach the far corner.
        let report = Search::new(Algorithm::Dls, req(10, 10, (0, 0), (9, 9))).run();
        assert!(!report.found());
        let report = Search::new(Algorithm::Dls, req(10, 10, (0, 0), (5, 5))).run();
        assert!(report.found());
    }

    #[test]
    fn ucs_cost_scenarios() {
        let near = Search::new(Algorithm::Ucs, req(10, 10, (0, 0), (0, 2))).run();
        assert_eq!(path_cost(&near.path.unwrap()), Some(Cost(20)));

        let far = Search::new(Algorithm::Ucs, req(10, 10, (0, 0), (9, 9))).run();
        let cost = path_cost(&far.path.unwrap()).unwrap();
        assert!(cost <= Cost(180));
        assert_eq!(cost.to_string(), "12.6");
    }

    #[test]
    fn runs_are_deterministic() {
        let r = req(8, 8, (1, 6), (7, 0));
        for a in Algorithm::ALL {
            let first: Vec<_> = Search::new(a, r).collect();
            let second: Vec<_> = Search::new(a, r).collect();
            assert_eq!(first, second, "{a}");
        }
    }

    #[test]
    fn abandoned_run_does_not_affect_a_fresh_one() {
        let r = req(8, 8, (0, 0), (7, 7));
        for a in Algorithm::ALL {
            let full = Search::new(a, r).run();
            let mut partial = Search::new(a, r);
            partial.next();
            partial.next();
            drop(partial);
            assert_eq!(Search::new(a, r).run(), full, "{a}");
        }
    }

    #[test]
    fn explored_sets_never_repeat() {
        let r = req(6, 6, (0, 5), (5, 0));
        for a in Algorithm::ALL {
            for frame in Search::new(a, r) {
                let set: Explored = frame.explored.iter().copied().collect();
                assert_eq!(set.len(), frame.explored.len(), "{a}");
            }
        }
    }

    #[test]
    fn explored_sets_grow_monotonically_within_a_strategy() {
        let r = req(6, 6, (0, 0), (5, 5));
        for a in [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Ucs, Algorithm::Bidirectional] {
            let frames: Vec<_> = Search::new(a, r).collect();
            for w in frames.windows(2) {
                assert!(w[1].explored.starts_with(&w[0].explored), "{a}");
            }
        }
    }

    #[test]
    fn report_counts_steps() {
        let report = Search::new(Algorithm::Bfs, req(1, 3, (0, 0), (0, 2))).run();
        assert_eq!(report.steps, 3);
        assert_eq!(report.explored, 2);
        assert!(report.found());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = SearchConfig::new(Algorithm::Dls).with_depth_limit(25);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn config_limit_is_optional() {
        let back: SearchConfig = serde_json::from_str(r#"{"algorithm":"Iddfs"}"#).unwrap();
        assert_eq!(back, SearchConfig::new(Algorithm::Iddfs));
    }

    #[test]
    fn request_round_trip() {
        let req = SearchRequest::new(Grid::new(10, 10), Coord::new(0, 0), Coord::new(9, 9));
        let json = serde_json::to_string(&req).unwrap();
        let back: SearchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
