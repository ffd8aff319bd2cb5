//! Search states and the run-length limits that constrain them.

use crucible_core::{Direction, Point};

use crate::search::SearchError;

/// A node of the constrained search graph.
///
/// Two states are the same node only if position, direction *and* run all
/// match: reaching a cell from a different direction or with a different run
/// leaves different moves available afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub pos: Point,
    pub dir: Direction,
    /// Consecutive steps already taken in `dir`. Zero only for seed states.
    pub run: u32,
}

impl SearchState {
    /// Create a new state.
    #[inline]
    pub const fn new(pos: Point, dir: Direction, run: u32) -> Self {
        Self { pos, dir, run }
    }

    /// A synthetic start state at `pos`: nominally facing `dir`, no steps taken.
    #[inline]
    pub const fn seed(pos: Point, dir: Direction) -> Self {
        Self::new(pos, dir, 0)
    }

    /// Whether this is a synthetic start state.
    #[inline]
    pub const fn is_seed(self) -> bool {
        self.run == 0
    }
}

/// Minimum and maximum number of consecutive straight steps.
///
/// A route must take at least `min_run` steps in a direction before it may
/// turn or stop, and may take at most `max_run` before it has to turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunLimits {
    pub min_run: u32,
    pub max_run: u32,
}

impl RunLimits {
    /// Turn freely, at most three steps in a straight line.
    pub const CRUCIBLE: Self = Self {
        min_run: 0,
        max_run: 3,
    };

    /// At least four and at most ten steps in a straight line.
    pub const ULTRA_CRUCIBLE: Self = Self {
        min_run: 4,
        max_run: 10,
    };

    /// Create validated limits.
    pub fn new(min_run: u32, max_run: u32) -> Result<Self, SearchError> {
        let limits = Self { min_run, max_run };
        limits.validate()?;
        Ok(limits)
    }

    /// Check that `max_run >= 1` and `max_run >= min_run`.
    pub fn validate(self) -> Result<(), SearchError> {
        if self.max_run == 0 || self.max_run < self.min_run {
            return Err(SearchError::InvalidLimits {
                min_run: self.min_run,
                max_run: self.max_run,
            });
        }
        Ok(())
    }

    /// Whether a route may turn away from `state`'s direction.
    #[inline]
    pub fn can_turn(self, state: SearchState) -> bool {
        state.run >= self.min_run
    }

    /// Whether a route may take another step in `state`'s direction.
    #[inline]
    pub fn can_continue(self, state: SearchState) -> bool {
        state.run < self.max_run
    }

    /// Whether a route may end at `state`.
    #[inline]
    pub fn can_stop(self, state: SearchState) -> bool {
        state.run >= self.min_run
    }
}

impl Default for RunLimits {
    fn default() -> Self {
        Self::CRUCIBLE
    }
}
