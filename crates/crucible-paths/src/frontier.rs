//! The open list and best-known-cost bookkeeping of the constrained search.

use std::collections::BinaryHeap;

use crucible_core::Point;
use rustc_hash::FxHashMap;

use crate::state::SearchState;

/// A queued `(cost, state)` pair, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) cost: i32,
    pub(crate) state: SearchState,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first; ties
        // break on the state for a deterministic pop order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered queue of states awaiting expansion.
///
/// The same state may be queued several times; entries made obsolete by a
/// later, cheaper push are filtered at pop time against [`CostTable`].
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, cost: i32, state: SearchState) {
        self.heap.push(FrontierEntry { cost, state });
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Extend<FrontierEntry> for Frontier {
    fn extend<I: IntoIterator<Item = FrontierEntry>>(&mut self, iter: I) {
        self.heap.extend(iter);
    }
}

/// Lowest cumulative cost seen so far for each state, plus the predecessor
/// that achieved it.
///
/// Entries are created on first visit and only ever lowered.
#[derive(Default)]
pub(crate) struct CostTable {
    best: FxHashMap<SearchState, i32>,
    parent: FxHashMap<SearchState, SearchState>,
}

impl CostTable {
    /// Record a seed state at cost 0. Seeds have no predecessor.
    pub(crate) fn seed(&mut self, state: SearchState) {
        self.best.insert(state, 0);
    }

    #[inline]
    pub(crate) fn get(&self, state: &SearchState) -> Option<i32> {
        self.best.get(state).copied()
    }

    /// Record `state` at `cost` via `from` unless an equal or cheaper cost is
    /// already known. Returns whether the table changed.
    pub(crate) fn improve(&mut self, state: SearchState, cost: i32, from: SearchState) -> bool {
        if self.get(&state).is_some_and(|known| known <= cost) {
            return false;
        }
        self.best.insert(state, cost);
        self.parent.insert(state, from);
        true
    }

    /// Whether a frontier entry popped at `cost` has been superseded.
    #[inline]
    pub(crate) fn is_stale(&self, state: &SearchState, cost: i32) -> bool {
        self.get(state).is_some_and(|known| known < cost)
    }

    /// Cells visited on the best known route to `state`, from its seed to
    /// `state` inclusive.
    pub(crate) fn path_to(&self, state: SearchState) -> Vec<Point> {
        let mut path = vec![state.pos];
        let mut cur = state;
        while let Some(&prev) = self.parent.get(&cur) {
            path.push(prev.pos);
            cur = prev;
        }
        path.reverse();
        path
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.best.len()
    }
}
