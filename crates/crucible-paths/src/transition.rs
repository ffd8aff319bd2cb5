//! Successor enumeration under the run-length rules.

use crucible_core::Direction;

use crate::frontier::{CostTable, FrontierEntry};
use crate::grid::CostGrid;
use crate::state::{RunLimits, SearchState};

/// Append to `out` every legal, non-dominated successor of `current`.
///
/// A move in direction `d` is legal when it does not reverse (seeds may
/// leave in any direction), does not turn before `min_run` straight steps,
/// does not exceed `max_run` straight steps and stays on the grid. Each
/// emitted successor has been recorded in `table` at its cumulative cost.
pub(crate) fn successors(
    grid: &CostGrid,
    limits: RunLimits,
    current: SearchState,
    cost: i32,
    table: &mut CostTable,
    out: &mut Vec<FrontierEntry>,
) {
    for d in Direction::ALL {
        let straight = d == current.dir;
        let turn = current.dir.perpendicular().contains(&d);
        // Anything else reverses, which only a seed may do.
        if !straight && !turn && !current.is_seed() {
            continue;
        }
        if !straight && !limits.can_turn(current) {
            continue;
        }
        if straight && !limits.can_continue(current) {
            continue;
        }

        let pos = current.pos.step(d);
        let Some(entry_cost) = grid.cost_at(pos) else {
            continue;
        };

        let run = if straight { current.run + 1 } else { 1 };
        let next = SearchState::new(pos, d, run);
        let next_cost = cost + entry_cost;

        if table.improve(next, next_cost, current) {
            out.push(FrontierEntry {
                cost: next_cost,
                state: next,
            });
        }
    }
}
