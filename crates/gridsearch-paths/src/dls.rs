use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid};

use crate::explored::Explored;
use crate::reconstruct::{Predecessors, build_path};
use crate::snapshot::Snapshot;

/// Terminal result of a depth-limited attempt.
#[derive(Clone, Debug)]
pub struct DlsOutcome {
    pub found: bool,
    /// Start to target inclusive when `found`, empty otherwise.
    pub path: Vec<Coord>,
    pub explored: Explored,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    pos: Coord,
    depth: u32,
    parent: Option<Coord>,
}

/// Depth-first search that does not expand cells at depth `limit` or deeper.
///
/// Yields one non-terminal snapshot per expansion. The success/failure
/// result is not a snapshot: once the iterator is exhausted, read it with
/// [`outcome`](Self::outcome) or [`into_outcome`](Self::into_outcome).
///
/// Cells reached at the limit are neither expanded nor added to the explored
/// set. A cell popped again below the limit is expanded again, taking the
/// parent of the entry that reached it, so paths follow the branch actually
/// walked and never exceed the limit.
#[derive(Clone, Debug)]
pub struct DepthLimited {
    grid: Grid,
    target: Coord,
    limit: u32,
    stack: Vec<Pending>,
    preds: Predecessors,
    explored: Explored,
    outcome: Option<(bool, Vec<Coord>)>,
}

impl DepthLimited {
    pub fn new(grid: Grid, start: Coord, target: Coord, limit: u32) -> Self {
        Self::with_explored(grid, start, target, limit, Explored::new())
    }

    /// Start an attempt that continues an existing explored set.
    ///
    /// Cells already in `explored` count as expanded: they are never pushed
    /// by this attempt.
    pub fn with_explored(
        grid: Grid,
        start: Coord,
        target: Coord,
        limit: u32,
        explored: Explored,
    ) -> Self {
        log::trace!("dls: {start} -> {target} on {grid}, limit {limit}");
        Self {
            grid,
            target,
            limit,
            stack: vec![Pending {
                pos: start,
                depth: 0,
                parent: None,
            }],
            preds: Predecessors::new(),
            explored,
            outcome: None,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    /// Whether the attempt has finished.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// `Some(true)` once the target was reached, `Some(false)` once the
    /// stack ran dry, `None` while the attempt is still running.
    pub fn found(&self) -> Option<bool> {
        self.outcome.as_ref().map(|(found, _)| *found)
    }

    /// The terminal result, once the iterator is exhausted.
    pub fn outcome(&self) -> Option<DlsOutcome> {
        self.outcome.as_ref().map(|(found, path)| DlsOutcome {
            found: *found,
            path: path.clone(),
            explored: self.explored.clone(),
        })
    }

    /// Consume the attempt, returning its result and handing the explored
    /// set back to the caller. `None` if the attempt had not finished.
    pub fn into_outcome(self) -> Option<DlsOutcome> {
        let (found, path) = self.outcome?;
        Some(DlsOutcome {
            found,
            path,
            explored: self.explored,
        })
    }

    /// Run the attempt to completion, discarding the snapshots.
    pub fn run(mut self) -> DlsOutcome {
        for _ in self.by_ref() {}
        let (found, path) = self.outcome.take().unwrap_or_default();
        DlsOutcome {
            found,
            path,
            explored: self.explored,
        }
    }

    fn accept(&mut self, entry: Pending) {
        match entry.parent {
            Some(parent) => self.preds.overwrite(entry.pos, parent),
            None => self.preds.record_origin(entry.pos),
        }
    }
}

impl Iterator for DepthLimited {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.outcome.is_some() {
            return None;
        }
        while let Some(entry) = self.stack.pop() {
            if entry.pos == self.target {
                self.accept(entry);
                let path = build_path(&self.preds, entry.pos);
                log::trace!("dls: reached {} at depth {}", entry.pos, entry.depth);
                self.outcome = Some((true, path));
                return None;
            }
            if entry.depth >= self.limit {
                continue;
            }
            if !self.explored.insert(entry.pos) {
                log::trace!("dls: re-expanding {} at depth {}", entry.pos, entry.depth);
            }
            self.accept(entry);

            for n in self.grid.neighbors(entry.pos).rev() {
                if !self.explored.contains(n) {
                    self.stack.push(Pending {
                        pos: n,
                        depth: entry.depth + 1,
                        parent: Some(entry.pos),
                    });
                }
            }
            let frontier = self.stack.iter().map(|p| p.pos).collect();
            return Some(Snapshot::progress(frontier, self.explored.as_slice()));
        }
        log::trace!("dls: limit {} exhausted", self.limit);
        self.outcome = Some((false, Vec::new()));
        None
    }
}

impl FusedIterator for DepthLimited {}
