use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid};

use crate::dls::DepthLimited;
use crate::snapshot::Snapshot;

/// Iterative-deepening depth-first search.
///
/// Runs [`DepthLimited`] attempts with limits `0, 1, 2, …` up to
/// `rows × cols − 1`, forwarding every snapshot of every attempt. The first
/// successful attempt ends the stream with a terminal snapshot. Each attempt
/// starts from an empty explored set.
#[derive(Clone, Debug)]
pub struct IterativeDeepening {
    grid: Grid,
    start: Coord,
    target: Coord,
    max_limit: u32,
    attempt: Option<DepthLimited>,
    found_at: Option<u32>,
}

impl IterativeDeepening {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        let max_limit = u32::try_from(grid.len().saturating_sub(1)).unwrap_or(u32::MAX);
        log::debug!("iddfs: {start} -> {target} on {grid}, limits 0..={max_limit}");
        Self {
            grid,
            start,
            target,
            max_limit,
            attempt: Some(DepthLimited::new(grid, start, target, 0)),
            found_at: None,
        }
    }

    /// Limit of the attempt currently running, if any.
    pub fn current_limit(&self) -> Option<u32> {
        self.attempt.as_ref().map(DepthLimited::limit)
    }

    /// Limit of the attempt that reached the target.
    pub fn found_at(&self) -> Option<u32> {
        self.found_at
    }

    /// Largest limit that will be attempted.
    pub fn max_limit(&self) -> u32 {
        self.max_limit
    }
}

impl Iterator for IterativeDeepening {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            let attempt = self.attempt.as_mut()?;
            if let Some(snapshot) = attempt.next() {
                return Some(snapshot);
            }

            let finished = self.attempt.take()?;
            let limit = finished.limit();
            let outcome = finished.into_outcome()?;
            if outcome.found {
                log::debug!("iddfs: reached {} with limit {limit}", self.target);
                self.found_at = Some(limit);
                return Some(Snapshot::found(outcome.path, outcome.explored.as_slice()));
            }
            if limit >= self.max_limit {
                log::debug!("iddfs: no path within limit {limit}");
                return None;
            }
            log::debug!("iddfs: deepening to {}", limit + 1);
            self.attempt = Some(DepthLimited::new(
                self.grid,
                self.start,
                self.target,
                limit + 1,
            ));
        }
    }
}

impl FusedIterator for IterativeDeepening {}
