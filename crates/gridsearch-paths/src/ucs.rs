use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid, NeighborSteps};

use crate::distance::Cost;
use crate::explored::Explored;
use crate::reconstruct::{Predecessors, build_path};
use crate::snapshot::Snapshot;

/// Priority-queue entry, ordered by cost and then by insertion sequence so
/// that equal-cost entries leave the queue first-in first-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub(crate) cost: Cost,
    pub(crate) seq: u64,
    pub(crate) pos: Coord,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then(self.seq.cmp(&other.seq))
            .then(self.pos.cmp(&other.pos))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost search (Dijkstra towards a single target).
///
/// Axis steps cost `1.0` and diagonal steps `1.4`. A snapshot is produced
/// after every push, and the path found has minimum total cost.
#[derive(Clone, Debug)]
pub struct UniformCost {
    grid: Grid,
    target: Coord,
    // Reverse turns the max-heap into a min-heap.
    open: BinaryHeap<Reverse<FrontierEntry>>,
    next_seq: u64,
    best: HashMap<Coord, Cost>,
    preds: Predecessors,
    explored: Explored,
    expanding: Option<(Coord, Cost, NeighborSteps)>,
    done: bool,
}

impl UniformCost {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        log::debug!("ucs: {start} -> {target} on {grid}");
        let mut s = Self {
            grid,
            target,
            open: BinaryHeap::new(),
            next_seq: 0,
            best: HashMap::from([(start, Cost::ZERO)]),
            preds: Predecessors::with_origin(start),
            explored: Explored::new(),
            expanding: None,
            done: false,
        };
        s.push(start, Cost::ZERO);
        s
    }

    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    /// Best known cost to reach `c`, if it has been reached.
    pub fn cost_to(&self, c: Coord) -> Option<Cost> {
        self.best.get(&c).copied()
    }

    fn push(&mut self, pos: Coord, cost: Cost) {
        self.open.push(Reverse(FrontierEntry {
            cost,
            seq: self.next_seq,
            pos,
        }));
        self.next_seq += 1;
    }

    /// Frontier in extraction order.
    fn progress(&self) -> Snapshot {
        let mut pending: Vec<FrontierEntry> = self.open.iter().map(|Reverse(e)| *e).collect();
        pending.sort_unstable();
        Snapshot::progress(
            pending.into_iter().map(|e| e.pos).collect(),
            self.explored.as_slice(),
        )
    }

    /// Relax the next neighbor that improves on its best known cost.
    /// Returns `true` if one was pushed.
    fn relax_next(&mut self, cur: Coord, cost: Cost, steps: &mut NeighborSteps) -> bool {
        for (dir, n) in steps.by_ref() {
            let candidate = cost + Cost::of_step(dir);
            let improves = self.best.get(&n).is_none_or(|&known| candidate < known);
            if improves {
                self.best.insert(n, candidate);
                self.preds.overwrite(n, cur);
                self.push(n, candidate);
                return true;
            }
        }
        false
    }
}

impl Iterator for UniformCost {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }
        loop {
            if let Some((cur, cost, mut steps)) = self.expanding.take() {
                if self.relax_next(cur, cost, &mut steps) {
                    self.expanding = Some((cur, cost, steps));
                    return Some(self.progress());
                }
            }

            let Some(Reverse(entry)) = self.open.pop() else {
                log::debug!("ucs: queue exhausted after {} expansions", self.explored.len());
                self.done = true;
                return None;
            };

            if entry.pos == self.target {
                log::debug!("ucs: reached {} at cost {}", entry.pos, entry.cost);
                self.done = true;
                let path = build_path(&self.preds, entry.pos);
                return Some(Snapshot::found(path, self.explored.as_slice()));
            }

            // Superseded by a cheaper entry that was already expanded.
            if !self.explored.insert(entry.pos) {
                continue;
            }
            self.expanding = Some((entry.pos, entry.cost, self.grid.neighbor_steps(entry.pos)));
        }
    }
}

impl FusedIterator for UniformCost {}
