//! Run-constrained minimum-cost search.
//!
//! The search is Dijkstra's algorithm over [`SearchState`]s rather than
//! cells: a state remembers the direction of travel and how many straight
//! steps have been taken, so that the [`RunLimits`] can be enforced on every
//! move. Entering a cell costs that cell's entry cost regardless of how it is
//! entered.
//!
//! A route has no committed direction at its start. Rather than make the
//! direction optional, the search seeds two synthetic states at the start
//! cell, one facing right and one facing down, both with a run of zero.

use std::fmt;

use crucible_core::{Direction, Point};

use crate::distance::manhattan;
use crate::frontier::{CostTable, Frontier, FrontierEntry};
use crate::grid::CostGrid;
use crate::state::{RunLimits, SearchState};
use crate::transition::successors;

/// Directions of the two synthetic start states.
const SEED_DIRECTIONS: [Direction; 2] = [Direction::Right, Direction::Down];

/// A minimum-cost route found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Sum of the entry costs of every cell entered (the start cell is free).
    pub cost: i32,
    /// Cells visited, from the start to the goal inclusive.
    pub path: Vec<Point>,
}

impl Route {
    /// Number of steps taken.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the route takes no steps (start and goal coincide).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direction of each step.
    pub fn directions(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|w| w[0].direction_to(w[1]))
            .collect()
    }

    /// The route as straight legs: each direction with its number of steps.
    pub fn legs(&self) -> Vec<(Direction, u32)> {
        let mut legs: Vec<(Direction, u32)> = Vec::new();
        for d in self.directions() {
            match legs.last_mut() {
                Some((last, n)) if *last == d => *n += 1,
                _ => legs.push((d, 1)),
            }
        }
        legs
    }
}

/// Errors returned by the constrained search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal lies outside the grid.
    OutOfBounds(Point),
    /// `max_run` is zero or smaller than `min_run`.
    InvalidLimits { min_run: u32, max_run: u32 },
    /// Every reachable state was expanded without a legal way to stop at the
    /// goal.
    NoRoute,
    /// The search expanded its whole budget of states without finishing.
    BudgetExhausted { expanded: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "search: {p} is outside the grid"),
            Self::InvalidLimits { min_run, max_run } => write!(
                f,
                "search: invalid run limits (min {min_run}, max {max_run})"
            ),
            Self::NoRoute => f.write_str("search: no route satisfies the run limits"),
            Self::BudgetExhausted { expanded } => {
                write!(f, "search: gave up after expanding {expanded} states")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// A configured run-constrained search over one grid.
///
/// Each call to [`run`](Self::run) builds its own frontier and cost table,
/// so a `ConstrainedSearch` can be reused and independent searches over the
/// same grid never share state.
#[derive(Debug, Clone, Copy)]
pub struct ConstrainedSearch<'g> {
    grid: &'g CostGrid,
    limits: RunLimits,
    budget: Option<usize>,
}

impl<'g> ConstrainedSearch<'g> {
    /// Create a search over `grid` under `limits`, with no expansion budget.
    pub fn new(grid: &'g CostGrid, limits: RunLimits) -> Self {
        Self {
            grid,
            limits,
            budget: None,
        }
    }

    /// Give up with [`SearchError::BudgetExhausted`] after expanding
    /// `expansions` states.
    pub fn with_expansion_budget(mut self, expansions: usize) -> Self {
        self.budget = Some(expansions);
        self
    }

    /// The limits this search enforces.
    pub fn limits(&self) -> RunLimits {
        self.limits
    }

    /// Find a minimum-cost route from `start` to `goal`.
    ///
    /// The route may only end at `goal` once it has taken at least `min_run`
    /// straight steps.
    pub fn run(&self, start: Point, goal: Point) -> Result<Route, SearchError> {
        self.limits.validate()?;
        for p in [start, goal] {
            if !self.grid.in_bounds(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }

        let mut frontier = Frontier::new();
        let mut table = CostTable::default();
        for dir in SEED_DIRECTIONS {
            let seed = SearchState::seed(start, dir);
            table.seed(seed);
            frontier.push(0, seed);
        }

        log::debug!(
            "constrained search {start} -> {goal} (distance {}), runs {}..={}",
            manhattan(start, goal),
            self.limits.min_run,
            self.limits.max_run
        );

        let mut expanded = 0usize;
        let mut next: Vec<FrontierEntry> = Vec::with_capacity(4);

        while let Some(FrontierEntry { cost, state }) = frontier.pop() {
            if table.is_stale(&state, cost) {
                log::trace!("stale entry {state:?} at {cost}");
                continue;
            }

            if state.pos == goal && self.limits.can_stop(state) {
                log::debug!(
                    "reached {goal} at cost {cost} after {expanded} expansions ({} states known)",
                    table.len()
                );
                return Ok(Route {
                    cost,
                    path: table.path_to(state),
                });
            }

            if self.budget.is_some_and(|budget| expanded >= budget) {
                log::debug!(
                    "expansion budget spent with {} entries queued",
                    frontier.len()
                );
                return Err(SearchError::BudgetExhausted { expanded });
            }
            expanded += 1;

            next.clear();
            successors(self.grid, self.limits, state, cost, &mut table, &mut next);
            frontier.extend(next.drain(..));
        }

        log::debug!(
            "no route to {goal}: frontier exhausted after {expanded} expansions ({} states known)",
            table.len()
        );
        Err(SearchError::NoRoute)
    }
}

/// Find a minimum-cost route from `start` to `goal` on `grid` under `limits`.
///
/// The route leaves `start` facing right or down. When `min_run` is at least
/// 1 those seeds cannot turn before their first straight leg, so a goal that
/// is only reachable by first moving up or left yields
/// [`SearchError::NoRoute`]. With `min_run == 0` the first step may go in any
/// direction.
pub fn shortest_constrained_path(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    limits: RunLimits,
) -> Result<Route, SearchError> {
    ConstrainedSearch::new(grid, limits).run(start, goal)
}

/// Cost of the minimum-cost route from `start` to `goal`.
pub fn minimum_cost(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    limits: RunLimits,
) -> Result<i32, SearchError> {
    shortest_constrained_path(grid, start, goal, limits).map(|route| route.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathRange, UNREACHABLE};
    use rand::{Rng, RngExt};

    const CITY: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const CORRIDOR: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";

    fn grid(s: &str) -> CostGrid {
        CostGrid::parse(s).unwrap()
    }

    fn corner_route(g: &CostGrid, limits: RunLimits) -> Result<Route, SearchError> {
        shortest_constrained_path(g, Point::ZERO, g.bottom_right(), limits)
    }

    fn random_grid(rng: &mut impl Rng) -> CostGrid {
        let w = rng.random_range(1..8usize);
        let h = rng.random_range(1..8usize);
        let rows: Vec<Vec<u8>> = (0..h)
            .map(|_| (0..w).map(|_| rng.random_range(0..10u8)).collect())
            .collect();
        CostGrid::from_rows(&rows).unwrap()
    }

    /// Checks that `route` is a legal, correctly priced walk under `limits`.
    fn assert_legal(g: &CostGrid, route: &Route, limits: RunLimits) {
        let dirs = route.directions();
        assert_eq!(dirs.len(), route.len(), "path has a non-adjacent step");
        for w in dirs.windows(2) {
            assert_ne!(w[1], w[0].opposite(), "path reverses");
        }
        for (d, n) in route.legs() {
            assert!(n <= limits.max_run, "{n} steps {d} exceeds max run");
            assert!(n >= limits.min_run, "{n} steps {d} is below min run");
        }
        let priced: i32 = route.path[1..]
            .iter()
            .map(|&p| g.cost_at(p).unwrap())
            .sum();
        assert_eq!(priced, route.cost);
    }

    #[test]
    fn city_with_crucible_limits() {
        let g = grid(CITY);
        let route = corner_route(&g, RunLimits::CRUCIBLE).unwrap();
        assert_eq!(route.cost, 102);
        assert_legal(&g, &route, RunLimits::CRUCIBLE);
    }

    #[test]
    fn city_with_ultra_crucible_limits() {
        let g = grid(CITY);
        let route = corner_route(&g, RunLimits::ULTRA_CRUCIBLE).unwrap();
        assert_eq!(route.cost, 94);
        assert_legal(&g, &route, RunLimits::ULTRA_CRUCIBLE);
    }

    #[test]
    fn non_square_corridor_needs_min_run_at_goal() {
        let g = grid(CORRIDOR);
        assert_eq!(g.bottom_right(), Point::new(11, 4));
        let route = corner_route(&g, RunLimits::ULTRA_CRUCIBLE).unwrap();
        assert_eq!(route.cost, 71);
        assert_legal(&g, &route, RunLimits::ULTRA_CRUCIBLE);
    }

    #[test]
    fn uniform_square_costs_manhattan_distance() {
        let g = grid("111\n111\n111");
        let goal = Point::new(2, 2);
        let route = shortest_constrained_path(&g, Point::ZERO, goal, RunLimits::CRUCIBLE).unwrap();
        assert_eq!(route.cost, 4);
        assert_eq!(route.cost, manhattan(Point::ZERO, goal));
        assert_eq!(route.path.first(), Some(&Point::ZERO));
        assert_eq!(route.path.last(), Some(&goal));
    }

    #[test]
    fn single_row_goes_straight() {
        let g = grid("1111");
        let limits = RunLimits::new(0, 3).unwrap();
        let route = shortest_constrained_path(&g, Point::ZERO, Point::new(3, 0), limits).unwrap();
        assert_eq!(route.cost, 3);
        assert_eq!(route.legs(), vec![(Direction::Right, 3)]);
    }

    #[test]
    fn grid_too_small_for_min_run() {
        let g = grid("111\n111\n111");
        assert_eq!(
            corner_route(&g, RunLimits::ULTRA_CRUCIBLE),
            Err(SearchError::NoRoute)
        );
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        // Every step must turn, but a single row leaves nowhere to turn to.
        let g = grid("111");
        let limits = RunLimits::new(0, 1).unwrap();
        let search = ConstrainedSearch::new(&g, limits).with_expansion_budget(1_000);
        assert_eq!(
            search.run(Point::ZERO, Point::new(2, 0)),
            Err(SearchError::NoRoute)
        );
    }

    #[test]
    fn budget_stops_long_searches() {
        let g = grid(CITY);
        let search = ConstrainedSearch::new(&g, RunLimits::CRUCIBLE).with_expansion_budget(10);
        assert_eq!(
            search.run(Point::ZERO, g.bottom_right()),
            Err(SearchError::BudgetExhausted { expanded: 10 })
        );
    }

    #[test]
    fn start_equal_to_goal() {
        let g = grid("5");
        let route = corner_route(&g, RunLimits::CRUCIBLE).unwrap();
        assert_eq!(route.cost, 0);
        assert!(route.is_empty());
        assert_eq!(route.path, vec![Point::ZERO]);
        // Cannot stop without having moved min_run steps.
        assert_eq!(
            corner_route(&g, RunLimits::ULTRA_CRUCIBLE),
            Err(SearchError::NoRoute)
        );
    }

    #[test]
    fn seeds_only_leave_right_or_down_once_min_run_applies() {
        let g = grid("11111\n11111\n11111\n11111\n11111");
        let start = g.bottom_right();
        assert_eq!(
            minimum_cost(&g, start, Point::ZERO, RunLimits::new(0, 3).unwrap()),
            Ok(8)
        );
        assert_eq!(
            minimum_cost(&g, start, Point::ZERO, RunLimits::new(1, 3).unwrap()),
            Err(SearchError::NoRoute)
        );
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let g = grid("12\n34");
        let limits = RunLimits::CRUCIBLE;
        assert_eq!(
            minimum_cost(&g, Point::new(-1, 0), Point::new(1, 1), limits),
            Err(SearchError::OutOfBounds(Point::new(-1, 0)))
        );
        assert_eq!(
            minimum_cost(&g, Point::ZERO, Point::new(2, 1), limits),
            Err(SearchError::OutOfBounds(Point::new(2, 1)))
        );
    }

    #[test]
    fn rejects_invalid_limits() {
        let g = grid("12\n34");
        let limits = RunLimits {
            min_run: 3,
            max_run: 2,
        };
        assert_eq!(
            minimum_cost(&g, Point::ZERO, Point::new(1, 1), limits),
            Err(SearchError::InvalidLimits {
                min_run: 3,
                max_run: 2
            })
        );
    }

    #[test]
    fn start_cell_cost_is_not_paid() {
        let g = grid("91\n11");
        assert_eq!(
            minimum_cost(&g, Point::ZERO, Point::new(1, 1), RunLimits::CRUCIBLE),
            Ok(2)
        );
    }

    #[test]
    fn zero_cost_cells_are_free() {
        let g = grid("000\n990\n000");
        assert_eq!(
            minimum_cost(&g, Point::ZERO, Point::new(0, 2), RunLimits::CRUCIBLE),
            Ok(0)
        );
    }

    #[test]
    fn max_run_forces_a_detour() {
        // Five straight steps are cheapest but only three are allowed.
        let g = grid("111111\n999999");
        let limits = RunLimits::new(0, 3).unwrap();
        let route = shortest_constrained_path(&g, Point::ZERO, Point::new(5, 0), limits).unwrap();
        assert_legal(&g, &route, limits);
        assert!(route.cost > 5);
    }

    #[test]
    fn repeated_runs_agree() {
        let g = grid(CITY);
        let search = ConstrainedSearch::new(&g, RunLimits::ULTRA_CRUCIBLE);
        let first = search.run(Point::ZERO, g.bottom_right());
        let second = search.run(Point::ZERO, g.bottom_right());
        assert_eq!(first, second);
    }

    #[test]
    fn matches_plain_dijkstra_when_runs_do_not_bind() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let g = random_grid(&mut rng);
            let goal = Point::new(
                rng.random_range(0..g.width()),
                rng.random_range(0..g.height()),
            );
            let loose = RunLimits::new(0, g.width().max(g.height()) as u32).unwrap();

            let mut pr = PathRange::new(g.range());
            pr.dijkstra_map(&g, &[Point::ZERO], UNREACHABLE);
            let route = shortest_constrained_path(&g, Point::ZERO, goal, loose).unwrap();
            assert_eq!(route.cost, pr.dijkstra_at(goal), "grid:\n{g}\ngoal {goal}");
            assert_legal(&g, &route, loose);
        }
    }

    #[test]
    fn raising_min_run_never_lowers_cost() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let g = random_grid(&mut rng);
            let max_run = rng.random_range(1..6u32);
            let mut prev: Option<i32> = Some(0);
            for min_run in 0..=max_run {
                let limits = RunLimits::new(min_run, max_run).unwrap();
                let cost = match corner_route(&g, limits) {
                    Ok(route) => {
                        assert_legal(&g, &route, limits);
                        Some(route.cost)
                    }
                    Err(SearchError::NoRoute) => None,
                    Err(e) => panic!("unexpected error {e}"),
                };
                // `None` stands for an infinite cost.
                match (prev, cost) {
                    (Some(p), Some(c)) => assert!(c >= p, "grid:\n{g}\nmin_run {min_run}"),
                    (None, Some(_)) => panic!("route appeared at min_run {min_run}:\n{g}"),
                    _ => {}
                }
                prev = cost;
            }
        }
    }
}
