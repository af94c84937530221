//! Predecessor bookkeeping and path reconstruction.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use gridsearch_core::{Coord, Grid};

/// Maps each discovered coordinate to the coordinate it was reached from.
///
/// The origin of a search maps to `None`. One map is kept per search
/// direction.
#[derive(Clone, Debug, Default)]
pub struct Predecessors {
    map: HashMap<Coord, Option<Coord>>,
}

impl Predecessors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding only the search origin.
    pub fn with_origin(origin: Coord) -> Self {
        let mut p = Self::new();
        p.record_origin(origin);
        p
    }

    /// Mark `origin` as the root of the search.
    pub fn record_origin(&mut self, origin: Coord) {
        self.map.insert(origin, None);
    }

    /// Record `from` as the predecessor of `c` unless `c` is already known.
    ///
    /// Returns `true` if the entry was new.
    pub fn record(&mut self, c: Coord, from: Coord) -> bool {
        match self.map.entry(c) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(Some(from));
                true
            }
        }
    }

    /// Replace the predecessor of `c`. Only cost relaxation does this.
    pub fn overwrite(&mut self, c: Coord, from: Coord) {
        self.map.insert(c, Some(from));
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.map.contains_key(&c)
    }

    /// `None` if `c` is unknown, `Some(None)` if it is the origin.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Option<Coord>> {
        self.map.get(&c).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Walk back from `c` to the origin, yielding `c` first.
    fn walk(&self, c: Option<Coord>) -> impl Iterator<Item = Coord> + '_ {
        std::iter::successors(c, move |&cur| self.get(cur).flatten())
    }
}

/// Build the path from the search origin to `endpoint`.
///
/// `endpoint` must have been recorded in `preds`; an unknown endpoint yields
/// a path containing only itself.
pub fn build_path(preds: &Predecessors, endpoint: Coord) -> Vec<Coord> {
    let mut path: Vec<Coord> = preds.walk(Some(endpoint)).collect();
    path.reverse();
    path
}

/// Splice a forward and a backward search tree at `meeting`.
///
/// The forward half runs from the forward origin to `meeting`; the backward
/// half continues from `meeting`'s backward predecessor to the backward
/// origin. `meeting` must be present in both maps.
pub fn merge_paths(forward: &Predecessors, backward: &Predecessors, meeting: Coord) -> Vec<Coord> {
    let mut path = build_path(forward, meeting);
    let next = backward.get(meeting).flatten();
    path.extend(backward.walk(next));
    path
}

/// Whether `path` runs from `start` to `target` through in-bounds,
/// pairwise-adjacent cells.
pub fn is_valid_path(grid: Grid, path: &[Coord], start: Coord, target: Coord) -> bool {
    path.first() == Some(&start)
        && path.last() == Some(&target)
        && path.iter().all(|&c| grid.contains(c))
        && path.windows(2).all(|w| grid.is_adjacent(w[0], w[1]))
}
