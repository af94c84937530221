//! Step-by-step uninformed search over 8-connected grids.
//!
//! Six classic strategies are provided, each as an iterator of progress
//! [`Snapshot`]s that a visualizer can pull one frame at a time:
//!
//! - **Breadth-first** ([`BreadthFirst`]): FIFO frontier, shortest by steps
//! - **Depth-first** ([`DepthFirst`]): LIFO frontier, clockwise priority
//! - **Uniform-cost** ([`UniformCost`]): cheapest path, diagonals cost 1.4
//! - **Depth-limited** ([`DepthLimited`]): depth-first with a cut-off
//! - **Iterative deepening** ([`IterativeDeepening`]): depth-limited with
//!   growing limits
//! - **Bidirectional** ([`Bidirectional`]): two breadth-first halves that
//!   meet in the middle
//!
//! [`Search`] wraps any of them behind a single type, selected by an
//! [`Algorithm`]. Every run owns its working state, so runs never interfere
//! and abandoning one early is just dropping it.
//!
//! ```
//! use gridsearch_core::{Coord, Grid};
//! use gridsearch_paths::{Algorithm, Search, SearchRequest};
//!
//! let req = SearchRequest::new(Grid::new(10, 10), Coord::new(0, 0), Coord::new(0, 2));
//! let report = Search::new(Algorithm::Bfs, req).run();
//! assert_eq!(report.path.unwrap().len(), 3);
//! ```

mod bfs;
mod bidirectional;
mod dfs;
mod distance;
mod dls;
mod explored;
mod iddfs;
mod reconstruct;
mod search;
mod snapshot;
mod ucs;

pub use bfs::BreadthFirst;
pub use bidirectional::Bidirectional;
pub use dfs::DepthFirst;
pub use distance::{Cost, chebyshev, path_cost};
pub use dls::{DepthLimited, DlsOutcome};
pub use explored::Explored;
pub use iddfs::IterativeDeepening;
pub use reconstruct::{Predecessors, build_path, is_valid_path, merge_paths};
pub use search::{
    Algorithm, Endpoint, ParseAlgorithmError, Report, RequestError, Search, SearchConfig,
    SearchRequest, default_depth_limit,
};
pub use snapshot::Snapshot;
pub use ucs::UniformCost;
