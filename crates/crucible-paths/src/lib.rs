//! Minimum-cost grid search with run-length constrained movement.
//!
//! The grid is a [`CostGrid`] of per-cell entry costs. A route pays the cost
//! of every cell it enters and moves one cardinal step at a time, but the
//! moves it may make depend on how it got there: it can never reverse, must
//! travel at least `min_run` cells in a straight line before turning or
//! stopping, and at most `max_run` before it has to turn (see [`RunLimits`]).
//!
//! - **Constrained search** ([`shortest_constrained_path`], [`ConstrainedSearch`])
//!   runs Dijkstra over [`SearchState`]s (position, direction, run length).
//! - **Dijkstra** cell-level distance maps ([`PathRange::dijkstra_map`]) ignore
//!   run limits and give the unconstrained lower bound.
//!
//! # Example
//!
//! ```
//! use crucible_core::Point;
//! use crucible_paths::{CostGrid, RunLimits, minimum_cost};
//!
//! let grid: CostGrid = "111\n111\n111".parse().unwrap();
//! let cost = minimum_cost(&grid, Point::ZERO, grid.bottom_right(), RunLimits::CRUCIBLE);
//! assert_eq!(cost, Ok(4));
//! ```

mod dijkstra;
mod distance;
mod frontier;
mod grid;
mod pathrange;
mod search;
mod state;
mod traits;
mod transition;

pub use distance::manhattan;
pub use grid::{CostGrid, GridError, MAX_CELL_COST};
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use search::{ConstrainedSearch, Route, SearchError, minimum_cost, shortest_constrained_path};
pub use state::{RunLimits, SearchState};
pub use traits::{Pather, WeightedPather};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crucible_core::Point;

    #[test]
    fn route_round_trip() {
        let route = Route {
            cost: 7,
            path: vec![Point::ZERO, Point::new(1, 0)],
        };
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, back);
    }

    #[test]
    fn limits_from_json() {
        let limits: RunLimits = serde_json::from_str(r#"{"min_run":4,"max_run":10}"#).unwrap();
        assert_eq!(limits, RunLimits::ULTRA_CRUCIBLE);
    }
}
