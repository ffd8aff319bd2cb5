//! The immutable cost grid searched by the path finders.
//!
//! A [`CostGrid`] is parsed from a rectangular block of digit characters.
//! Each digit is the cost paid for *entering* that cell.

use std::fmt;
use std::str::FromStr;

use crucible_core::{Point, Range};

use crate::pathrange::UNREACHABLE;
use crate::traits::{Pather, WeightedPather};

/// Largest entry cost a single cell may carry.
pub const MAX_CELL_COST: u8 = 9;

/// A rectangular grid of per-cell entry costs in `0..=9`.
///
/// Costs are stored row-major. The grid is anchored at the origin, so its
/// [`range`](Self::range) is `[0, width) × [0, height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    rng: Range,
    costs: Vec<u8>,
}

impl CostGrid {
    /// Parse a grid from text: one row per line, one digit per cell.
    ///
    /// Blank lines at the start or end of the input are ignored and both
    /// `\n` and `\r\n` line endings are accepted. Every row must have the
    /// same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        if s.is_empty() {
            return Err(GridError::Empty);
        }

        let mut costs = Vec::with_capacity(s.len());
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for (y, line) in s.lines().enumerate() {
            let row_start = costs.len();
            for (x, ch) in line.chars().enumerate() {
                let Some(d) = ch.to_digit(10) else {
                    return Err(GridError::InvalidDigit {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    });
                };
                costs.push(d as u8);
            }
            check_width(&mut width, y, costs.len() - row_start)?;
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rng: Range::with_size(width as i32, height as i32),
            costs,
        })
    }

    /// Build a grid from rows of numeric costs.
    ///
    /// Applies the same validation as [`parse`](Self::parse): rows must be
    /// non-empty and of equal width, and every cost must be at most
    /// [`MAX_CELL_COST`].
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let mut costs = Vec::new();
        let mut width: Option<usize> = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            for (x, &cost) in row.iter().enumerate() {
                if cost > MAX_CELL_COST {
                    return Err(GridError::CostOutOfRange {
                        cost,
                        pos: Point::new(x as i32, y as i32),
                    });
                }
            }
            check_width(&mut width, y, row.len())?;
            costs.extend_from_slice(row);
        }

        match width {
            Some(w) if w > 0 => Ok(Self {
                rng: Range::with_size(w as i32, rows.len() as i32),
                costs,
            }),
            _ => Err(GridError::Empty),
        }
    }

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// Entry cost of the cell at `p`, or `None` when `p` is out of bounds.
    #[inline]
    pub fn cost_at(&self, p: Point) -> Option<i32> {
        self.idx(p).map(|i| i32::from(self.costs[i]))
    }

    /// The bottom-right cell, `(width - 1, height - 1)`.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        // A constructed grid is never empty.
        self.rng.last().unwrap_or(Point::ZERO)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }
}

fn check_width(width: &mut Option<usize>, row: usize, found: usize) -> Result<(), GridError> {
    match *width {
        None => {
            *width = Some(found);
            Ok(())
        }
        Some(expected) if expected != found => Err(GridError::Ragged {
            row,
            expected,
            found,
        }),
        Some(_) => Ok(()),
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.costs.chunks(self.width() as usize).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl Pather for CostGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.in_bounds(n)));
    }
}

impl WeightedPather for CostGrid {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.cost_at(to).unwrap_or(UNREACHABLE)
    }
}

/// Errors that can occur when building a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input holds no cells.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `0`–`9` was found.
    InvalidDigit { ch: char, pos: Point },
    /// A numeric cost above [`MAX_CELL_COST`] was supplied.
    CostOutOfRange { cost: u8, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("cost grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "cost grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidDigit { ch, pos } => {
                write!(f, "cost grid: invalid digit {ch:?} at {pos}")
            }
            Self::CostOutOfRange { cost, pos } => {
                write!(
                    f,
                    "cost grid: cost {cost} at {pos} exceeds {MAX_CELL_COST}"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
