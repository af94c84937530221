//! **gridsearch-core** — the grid model shared by every search strategy.
//!
//! This crate provides the foundational types of the *gridsearch*
//! workspace: the [`Coord`] value type, the clockwise [`Direction`] table and
//! the [`Grid`] bounds/neighbor oracle. A grid carries no per-cell data; it
//! only answers "is this coordinate inside?" and "what are its neighbors?".

pub mod geom;
pub mod grid;

pub use geom::{Coord, Direction};
pub use grid::{Grid, GridIter, NeighborSteps};
