//! **crucible-core** — geometry primitives for run-constrained grid search.
//!
//! Provides [`Point`] and [`Range`] for addressing a rectangular grid, and
//! [`Direction`] for the four cardinal moves between adjacent cells.

pub mod direction;
pub mod geom;

pub use direction::Direction;
pub use geom::{Point, Range, RangeIter};
