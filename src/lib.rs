//! Constrained-turn shortest paths over weighted digit grids.
//!
//! This crate computes the minimum total entry cost of a walk across a
//! rectangular grid of digit costs, where the walk may not continue
//! straight for more than `max_run` consecutive cells and, in the stricter
//! variant, must go straight for at least `min_run` cells before it may
//! turn or stop. The search runs over augmented (position, heading, run)
//! states with a label-correcting worklist.
//!
//! ```
//! use gridpath::{solve, Grid, RunLimits};
//!
//! let grid = Grid::parse("241\n321\n325").unwrap();
//! let cost = solve(&grid, RunLimits::BASIC).unwrap();
//! assert_eq!(cost, 11);
//! ```

pub mod error;
pub mod grid;
pub mod labels;
pub mod solver;

// Re-export main types
pub use error::{ParseError, PathError};
pub use grid::{Direction, Grid, Position};
pub use labels::{LabelStore, RunState};
pub use solver::{run_search, solve, solve_between, RunLimits, SearchOutcome, SearchStats};
