use std::fmt;
use std::ops::Add;

use gridsearch_core::{Coord, Direction};

/// Accumulated path cost, counted in tenths of an axis-aligned step.
///
/// An axis step costs `1.0` and a diagonal step `1.4`. Keeping tenths as an
/// integer makes sums exact, so equal-cost paths compare equal regardless of
/// the order their steps were added in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(pub u32);

impl Cost {
    pub const ZERO: Self = Self(0);
    /// Cost of an axis-aligned step.
    pub const AXIS: Self = Self(10);
    /// Cost of a diagonal step (approximates √2).
    pub const DIAGONAL: Self = Self(14);

    /// Cost of a single step in direction `dir`.
    #[inline]
    pub const fn of_step(dir: Direction) -> Self {
        if dir.is_diagonal() {
            Self::DIAGONAL
        } else {
            Self::AXIS
        }
    }

    /// The cost in step units (`1.0` per axis step, `1.4` per diagonal).
    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Raw value in tenths of a step.
    #[inline]
    pub const fn tenths(self) -> u32 {
        self.0
    }
}

impl Add for Cost {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Total weighted cost of walking `path`.
///
/// Returns `None` if two consecutive entries are not 8-neighbors.
pub fn path_cost(path: &[Coord]) -> Option<Cost> {
    path.windows(2).try_fold(Cost::ZERO, |acc, w| {
        Direction::between(w[0], w[1]).map(|dir| acc + Cost::of_step(dir))
    })
}

/// Chebyshev (L∞) distance: the fewest 8-connected steps between two cells
/// of an obstacle-free grid.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}
