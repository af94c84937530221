//! Geometry primitives: [`Coord`] and [`Direction`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downwards and columns grow
//! to the right, so "north" is `row - 1`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate. Compared, hashed and ordered by value (row-major).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The coordinate one step away in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        self.shift(dr, dc)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass directions of the 8-connected grid.
///
/// [`Direction::ALL`] lists them clockwise starting at north. That order is
/// observable: strategies expand neighbors in exactly this sequence (or its
/// reverse when pushing onto a stack).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// The direction table, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// `(row, col)` delta of a single step.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    /// Delta of a single step as a [`Coord`].
    #[inline]
    pub const fn delta(self) -> Coord {
        let (dr, dc) = self.offset();
        Coord::new(dr, dc)
    }

    /// Whether the step changes both row and column.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (dr, dc) = self.offset();
        dr != 0 && dc != 0
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// The direction of a single step from `from` to `to`, if they are
    /// 8-neighbors.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.delta() == d)
    }
}
