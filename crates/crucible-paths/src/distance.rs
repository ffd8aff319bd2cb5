//! Grid distance metrics.

use crucible_core::Point;

/// Manhattan (L1) distance between two points.
///
/// On a grid whose cells all cost at least `c`, `c * manhattan(start, goal)`
/// is a lower bound on any route between them.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
