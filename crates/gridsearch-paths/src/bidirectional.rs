//! Bidirectional breadth-first search.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid};

use crate::explored::Explored;
use crate::reconstruct::{Predecessors, merge_paths};
use crate::snapshot::Snapshot;

/// One half of a bidirectional search.
#[derive(Clone, Debug)]
struct Side {
    queue: VecDeque<Coord>,
    preds: Predecessors,
}

impl Side {
    fn new(origin: Coord) -> Self {
        Self {
            queue: VecDeque::from([origin]),
            preds: Predecessors::with_origin(origin),
        }
    }

    /// Expand the head of the queue. Returns the first newly discovered
    /// neighbor that the other side already knows, if any.
    fn expand(
        &mut self,
        grid: Grid,
        other: &Predecessors,
        explored: &mut Explored,
    ) -> Option<Coord> {
        let cur = self.queue.pop_front()?;
        explored.insert(cur);
        for n in grid.neighbors(cur) {
            if self.preds.record(n, cur) {
                self.queue.push_back(n);
                if other.contains(n) {
                    return Some(n);
                }
            }
        }
        None
    }
}

/// Two breadth-first searches, one from the start and one from the target,
/// advanced in lock step until one discovers a cell the other has reached.
///
/// One snapshot is produced per full step (a forward expansion followed by
/// a backward expansion). The merged path is valid but not necessarily
/// shortest.
#[derive(Clone, Debug)]
pub struct Bidirectional {
    grid: Grid,
    forward: Side,
    backward: Side,
    explored: Explored,
    done: bool,
}

impl Bidirectional {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        log::debug!("bidirectional: {start} <-> {target} on {grid}");
        Self {
            grid,
            forward: Side::new(start),
            backward: Side::new(target),
            explored: Explored::new(),
            done: false,
        }
    }

    /// Cells expanded by either side, in expansion order.
    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    fn meet(&mut self, meeting: Coord) -> Snapshot {
        log::debug!("bidirectional: frontiers met at {meeting}");
        self.done = true;
        let path = merge_paths(&self.forward.preds, &self.backward.preds, meeting);
        Snapshot::found(path, self.explored.as_slice())
    }
}

impl Iterator for Bidirectional {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }
        if self.forward.queue.is_empty() || self.backward.queue.is_empty() {
            log::debug!("bidirectional: a frontier emptied before meeting");
            self.done = true;
            return None;
        }

        if let Some(m) = self
            .forward
            .expand(self.grid, &self.backward.preds, &mut self.explored)
        {
            return Some(self.meet(m));
        }
        if let Some(m) = self
            .backward
            .expand(self.grid, &self.forward.preds, &mut self.explored)
        {
            return Some(self.meet(m));
        }

        let frontier = self
            .forward
            .queue
            .iter()
            .chain(self.backward.queue.iter())
            .copied()
            .collect();
        Some(Snapshot::progress(frontier, self.explored.as_slice()))
    }
}

impl FusedIterator for Bidirectional {}
