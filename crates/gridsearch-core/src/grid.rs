//! The [`Grid`] bounds/neighbor oracle.
//!
//! A grid is just its dimensions. It holds no cells, so it is `Copy` and can
//! be shared freely between any number of concurrent searches.

use std::fmt;

use crate::geom::{Coord, Direction};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size `rows × cols` rectangle of cells, anchored at `(0, 0)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "GridDims"))]
pub struct Grid {
    rows: i32,
    cols: i32,
}

/// Wire form of a [`Grid`]; deserialized values go through [`Grid::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridDims {
    rows: i32,
    cols: i32,
}

#[cfg(feature = "serde")]
impl From<GridDims> for Grid {
    fn from(d: GridDims) -> Self {
        Grid::new(d.rows, d.cols)
    }
}

impl Grid {
    /// Create a grid. Negative dimensions are clamped to zero.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: if rows < 0 { 0 } else { rows },
            cols: if cols < 0 { 0 } else { cols },
        }
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub const fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// In-bounds neighbors of `c`, in clockwise [`Direction::ALL`] order.
    ///
    /// The iterator is double-ended: `.rev()` yields the counter-clockwise
    /// order used when pushing onto a LIFO stack.
    #[inline]
    pub fn neighbors(self, c: Coord) -> impl DoubleEndedIterator<Item = Coord> {
        self.neighbor_steps(c).map(|(_, n)| n)
    }

    /// Like [`neighbors`](Self::neighbors), but each neighbor is paired with
    /// the direction of the step that reaches it.
    #[inline]
    pub fn neighbor_steps(self, c: Coord) -> NeighborSteps {
        NeighborSteps {
            grid: self,
            center: c,
            front: 0,
            back: Direction::ALL.len(),
        }
    }

    /// Append the in-bounds neighbors of `c` to `buf` in clockwise order.
    pub fn neighbors_into(self, c: Coord, buf: &mut Vec<Coord>) {
        buf.extend(self.neighbors(c));
    }

    /// Whether `a` and `b` are distinct 8-neighbors, both inside the grid.
    #[inline]
    pub fn is_adjacent(self, a: Coord, b: Coord) -> bool {
        self.contains(a) && self.contains(b) && Direction::between(a, b).is_some()
    }

    /// Row-major iterator over every coordinate of the grid.
    #[inline]
    pub fn iter(self) -> GridIter {
        GridIter {
            grid: self,
            cur: Coord::ZERO,
        }
    }
}

impl IntoIterator for Grid {
    type Item = Coord;
    type IntoIter = GridIter;
    #[inline]
    fn into_iter(self) -> GridIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// NeighborSteps
// ---------------------------------------------------------------------------

/// Iterator over the in-bounds `(direction, neighbor)` pairs of a cell.
#[derive(Clone, Debug)]
pub struct NeighborSteps {
    grid: Grid,
    center: Coord,
    front: usize,
    back: usize,
}

impl Iterator for NeighborSteps {
    type Item = (Direction, Coord);

    fn next(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            let dir = Direction::ALL[self.front];
            self.front += 1;
            let n = self.center.step(dir);
            if self.grid.contains(n) {
                return Some((dir, n));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

impl DoubleEndedIterator for NeighborSteps {
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.back > self.front {
            self.back -= 1;
            let dir = Direction::ALL[self.back];
            let n = self.center.step(dir);
            if self.grid.contains(n) {
                return Some((dir, n));
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates of a [`Grid`].
#[derive(Clone, Debug)]
pub struct GridIter {
    grid: Grid,
    cur: Coord,
}

impl Iterator for GridIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.cur.row >= self.grid.rows || self.grid.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.grid.cols {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.grid.is_empty() || self.cur.row >= self.grid.rows {
            return (0, Some(0));
        }
        let w = self.grid.cols as usize;
        let remaining_in_row = (self.grid.cols - self.cur.col) as usize;
        let remaining_rows = (self.grid.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let g = Grid::new(3, 4);
        assert_eq!(g.len(), 12);
        assert!(g.contains(Coord::new(0, 0)));
        assert!(g.contains(Coord::new(2, 3)));
        assert!(!g.contains(Coord::new(3, 0)));
        assert!(!g.contains(Coord::new(0, 4)));
        assert!(!g.contains(Coord::new(-1, 0)));
        assert!(!g.contains(Coord::new(0, -1)));
    }

    #[test]
    fn negative_dimensions_clamp_to_empty() {
        let g = Grid::new(-2, 5);
        assert!(g.is_empty());
        assert_eq!(g.len(), 0);
        assert_eq!(g.iter().count(), 0);
    }

    #[test]
    fn interior_neighbors_clockwise() {
        let g = Grid::new(10, 10);
        let ns: Vec<_> = g.neighbors(Coord::new(5, 5)).collect();
        assert_eq!(
            ns,
            vec![
                Coord::new(4, 5),
                Coord::new(4, 6),
                Coord::new(5, 6),
                Coord::new(6, 6),
                Coord::new(6, 5),
                Coord::new(6, 4),
                Coord::new(5, 4),
                Coord::new(4, 4),
            ]
        );
    }

    #[test]
    fn corner_neighbors_are_filtered() {
        let g = Grid::new(10, 10);
        let ns: Vec<_> = g.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(ns, vec![Coord::new(0, 1), Coord::new(1, 1), Coord::new(1, 0)]);

        let ns: Vec<_> = g.neighbors(Coord::new(9, 9)).collect();
        assert_eq!(ns, vec![Coord::new(8, 9), Coord::new(9, 8), Coord::new(8, 8)]);
    }

    #[test]
    fn reversed_neighbors() {
        let g = Grid::new(10, 10);
        let fwd: Vec<_> = g.neighbors(Coord::new(0, 4)).collect();
        let mut back: Vec<_> = g.neighbors(Coord::new(0, 4)).rev().collect();
        back.reverse();
        assert_eq!(fwd, back);
        assert_eq!(fwd.len(), 5);
    }

    #[test]
    fn mixed_direction_iteration() {
        let g = Grid::new(3, 3);
        let mut it = g.neighbor_steps(Coord::new(1, 1));
        assert_eq!(it.next(), Some((Direction::N, Coord::new(0, 1))));
        assert_eq!(it.next_back(), Some((Direction::NW, Coord::new(0, 0))));
        assert_eq!(it.count(), 6);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let g = Grid::new(1, 1);
        assert_eq!(g.neighbors(Coord::ZERO).count(), 0);
    }

    #[test]
    fn neighbors_into_appends() {
        let g = Grid::new(2, 2);
        let mut buf = vec![Coord::new(7, 7)];
        g.neighbors_into(Coord::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                Coord::new(7, 7),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(0, 0)
            ]
        );
    }

    #[test]
    fn adjacency() {
        let g = Grid::new(4, 4);
        assert!(g.is_adjacent(Coord::new(1, 1), Coord::new(2, 2)));
        assert!(!g.is_adjacent(Coord::new(1, 1), Coord::new(1, 1)));
        assert!(!g.is_adjacent(Coord::new(1, 1), Coord::new(1, 3)));
        assert!(!g.is_adjacent(Coord::new(0, 0), Coord::new(-1, -1)));
    }

    #[test]
    fn row_major_iteration() {
        let g = Grid::new(2, 3);
        let cells: Vec<_> = g.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[3], Coord::new(1, 0));
        assert_eq!(cells[5], Coord::new(1, 2));
        let mut it = g.iter();
        it.next();
        assert_eq!(it.len(), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Grid::new(10, 20).to_string(), "10x20");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::new(10, 20);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn negative_dimensions_are_clamped() {
        let g: Grid = serde_json::from_str(r#"{"rows":-3,"cols":4}"#).unwrap();
        assert_eq!(g, Grid::new(0, 4));
        assert!(g.is_empty());
        assert_eq!(g.len(), 0);
        assert_eq!(g.iter().count(), 0);
    }
}
