//! Command-line front end: route a crucible across a digit grid.
//!
//! The input file holds one grid row per line, one digit (the cell's entry
//! cost) per column. The route always runs from the top-left cell to the
//! bottom-right cell.

use std::fmt;

use crucible_core::Point;
use crucible_paths::{CostGrid, RunLimits, SearchError, minimum_cost};

/// What to compute for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Both presets: [`RunLimits::CRUCIBLE`] then [`RunLimits::ULTRA_CRUCIBLE`].
    Presets,
    /// A single search with caller-chosen limits.
    Custom(RunLimits),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: String,
    pub mode: Mode,
}

/// Usage line printed on bad arguments.
pub const USAGE: &str = "usage: crucible <input-file> [min_run max_run]";

/// Errors from argument handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// Wrong number of arguments.
    Usage,
    /// A run limit was not a non-negative integer.
    BadNumber(String),
    /// The limits were numbers but not a valid pair.
    Limits(SearchError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => f.write_str(USAGE),
            Self::BadNumber(s) => write!(f, "invalid run limit {s:?}\n{USAGE}"),
            Self::Limits(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl Args {
    /// Parse the arguments following the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let number = |s: &String| {
            s.parse::<u32>()
                .map_err(|_| ArgsError::BadNumber(s.clone()))
        };
        match args.as_slice() {
            [input] => Ok(Self {
                input: input.clone(),
                mode: Mode::Presets,
            }),
            [input, min_run, max_run] => {
                let limits = RunLimits::new(number(min_run)?, number(max_run)?)
                    .map_err(ArgsError::Limits)?;
                Ok(Self {
                    input: input.clone(),
                    mode: Mode::Custom(limits),
                })
            }
            _ => Err(ArgsError::Usage),
        }
    }
}

/// Cost from the top-left to the bottom-right cell, or `None` if no route
/// satisfies `limits`.
pub fn corner_cost(grid: &CostGrid, limits: RunLimits) -> Result<Option<i32>, SearchError> {
    match minimum_cost(grid, Point::ZERO, grid.bottom_right(), limits) {
        Ok(cost) => Ok(Some(cost)),
        Err(SearchError::NoRoute) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Run `mode` over the grid text and return the lines to print.
pub fn solve(text: &str, mode: Mode) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let grid = CostGrid::parse(text)?;
    log::debug!("grid {}x{}", grid.width(), grid.height());

    let runs: Vec<(&str, RunLimits)> = match mode {
        Mode::Presets => vec![
            ("Part 1", RunLimits::CRUCIBLE),
            ("Part 2", RunLimits::ULTRA_CRUCIBLE),
        ],
        Mode::Custom(limits) => vec![("Cost", limits)],
    };

    let mut lines = Vec::with_capacity(runs.len());
    for (label, limits) in runs {
        let line = match corner_cost(&grid, limits)? {
            Some(cost) => format!("{label}: {cost}"),
            None => format!("{label}: no route"),
        };
        lines.push(line);
    }
    Ok(lines)
}
