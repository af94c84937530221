use std::iter::FusedIterator;

use gridsearch_core::{Coord, Grid};

use crate::explored::Explored;
use crate::reconstruct::{Predecessors, build_path};
use crate::snapshot::Snapshot;

/// A pending stack entry: a cell and the expanded cell that pushed it.
#[derive(Clone, Copy, Debug)]
struct Pending {
    pos: Coord,
    parent: Option<Coord>,
}

/// Depth-first search with a LIFO frontier.
///
/// Neighbors are pushed in reverse clockwise order so that they pop in
/// clockwise order. One snapshot is produced per expansion. The path is
/// whatever branch the traversal followed; it is not shortest.
#[derive(Clone, Debug)]
pub struct DepthFirst {
    grid: Grid,
    target: Coord,
    stack: Vec<Pending>,
    preds: Predecessors,
    explored: Explored,
    done: bool,
}

impl DepthFirst {
    pub fn new(grid: Grid, start: Coord, target: Coord) -> Self {
        log::debug!("dfs: {start} -> {target} on {grid}");
        Self {
            grid,
            target,
            stack: vec![Pending {
                pos: start,
                parent: None,
            }],
            preds: Predecessors::new(),
            explored: Explored::new(),
            done: false,
        }
    }

    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    fn accept(&mut self, entry: Pending) {
        match entry.parent {
            Some(parent) => {
                self.preds.record(entry.pos, parent);
            }
            None => self.preds.record_origin(entry.pos),
        }
    }
}

impl Iterator for DepthFirst {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }
        while let Some(entry) = self.stack.pop() {
            if entry.pos == self.target {
                log::debug!("dfs: reached {} after {} expansions", entry.pos, self.explored.len());
                self.accept(entry);
                self.done = true;
                let path = build_path(&self.preds, entry.pos);
                return Some(Snapshot::found(path, self.explored.as_slice()));
            }
            if !self.explored.insert(entry.pos) {
                continue;
            }
            self.accept(entry);

            for n in self.grid.neighbors(entry.pos).rev() {
                if !self.explored.contains(n) {
                    self.stack.push(Pending {
                        pos: n,
                        parent: Some(entry.pos),
                    });
                }
            }
            let frontier = self.stack.iter().map(|p| p.pos).collect();
            return Some(Snapshot::progress(frontier, self.explored.as_slice()));
        }
        log::debug!("dfs: stack exhausted after {} expansions", self.explored.len());
        self.done = true;
        None
    }
}

impl FusedIterator for DepthFirst {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::is_valid_path;

    fn final_path(search: DepthFirst) -> Option<Vec<Coord>> {
        search.last().and_then(|s| s.path)
    }

    #[test]
    fn first_expansion_pushes_reverse_clockwise() {
        let g = Grid::new(10, 10);
        let first = DepthFirst::new(g, Coord::new(0, 0), Coord::new(9, 9))
            .next()
            .unwrap();
        // S, SE, E pushed so that E (first clockwise) is on top.
        assert_eq!(
            first.frontier,
            vec![Coord::new(1, 0), Coord::new(1, 1), Coord::new(0, 1)]
        );
        assert_eq!(first.explored, vec![Coord::new(0, 0)]);
    }

    #[test]
    fn follows_clockwise_priority() {
        let g = Grid::new(10, 10);
        let path = final_path(DepthFirst::new(g, Coord::new(0, 0), Coord::new(9, 9))).unwrap();
        // Runs east along the top row, then south down the last column.
        assert_eq!(path.len(), 19);
        assert_eq!(path[9], Coord::new(0, 9));
        assert!(is_valid_path(g, &path, Coord::new(0, 0), Coord::new(9, 9)));
    }

    #[test]
    fn adjacent_target() {
        let g = Grid::new(10, 10);
        let path = final_path(DepthFirst::new(g, Coord::new(0, 0), Coord::new(0, 2)));
        assert_eq!(
            path,
            Some(vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)])
        );
    }

    #[test]
    fn one_snapshot_per_expansion() {
        let g = Grid::new(5, 5);
        let mut search = DepthFirst::new(g, Coord::new(2, 2), Coord::new(4, 0));
        let frames: Vec<_> = search.by_ref().collect();
        let progress = frames.iter().filter(|f| !f.is_terminal()).count();
        assert_eq!(progress, search.explored().len());
        for (i, f) in frames.iter().filter(|f| !f.is_terminal()).enumerate() {
            assert_eq!(f.explored.len(), i + 1);
        }
    }

    #[test]
    fn valid_paths_for_every_pair() {
        let g = Grid::new(4, 4);
        for s in g {
            for t in g {
                if s == t {
                    continue;
                }
                let path = final_path(DepthFirst::new(g, s, t)).unwrap();
                assert!(is_valid_path(g, &path, s, t), "{s} -> {t}: {path:?}");
                let uniq: Explored = path.iter().copied().collect();
                assert_eq!(uniq.len(), path.len());
            }
        }
    }

    #[test]
    fn unreachable_target_ends_without_path() {
        let g = Grid::new(3, 3);
        let mut search = DepthFirst::new(g, Coord::new(0, 0), Coord::new(3, 3));
        assert!(search.by_ref().all(|f| !f.is_terminal()));
        assert_eq!(search.explored().len(), 9);
        assert_eq!(search.next(), None);
    }
}
