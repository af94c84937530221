use std::collections::VecDeque;
use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid, NeighborSteps};

use crate::explored::Explored;
use crate::reconstruct::{Predecessors, build_path};
use crate::snapshot::Snapshot;

/// Breadth-first search with a FIFO frontier.
///
/// A snapshot is produced right after every enqueue, so one expansion can
/// span several frames. The path found is shortest by step count.
#[derive(Clone, Debug)]
pub struct BreadthFirst {
    grid: Grid,
    target: Coord,
    queue: VecDeque<Coord>,
    preds: Predecessors,
    explored: Explored,
    // Node being expanded and the neighbors it has left to examine.
    expanding: Option<(Coord, NeighborSteps)>,
    done: bool,
}

impl BreadthFirst {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        log::debug!("bfs: {start} -> {target} on {grid}");
        Self {
            grid,
            target,
            queue: VecDeque::from([start]),
            preds: Predecessors::with_origin(start),
            explored: Explored::new(),
            expanding: None,
            done: false,
        }
    }

    /// Cells expanded so far.
    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    fn progress(&self) -> Snapshot {
        Snapshot::progress(self.queue.iter().copied().collect(), self.explored.as_slice())
    }
}

impl Iterator for BreadthFirst {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }
        loop {
            if let Some((cur, mut steps)) = self.expanding.take() {
                while let Some((_, n)) = steps.next() {
                    if self.preds.record(n, cur) {
                        self.queue.push_back(n);
                        self.expanding = Some((cur, steps));
                        return Some(self.progress());
                    }
                }
            }

            let Some(cur) = self.queue.pop_front() else {
                log::debug!("bfs: frontier exhausted after {} expansions", self.explored.len());
                self.done = true;
                return None;
            };

            if cur == self.target {
                log::debug!("bfs: reached {cur} after {} expansions", self.explored.len());
                self.done = true;
                let path = build_path(&self.preds, cur);
                return Some(Snapshot::found(path, self.explored.as_slice()));
            }

            self.explored.insert(cur);
            self.expanding = Some((cur, self.grid.neighbor_steps(cur)));
        }
    }
}

impl FusedIterator for BreadthFirst {}
