//! Error taxonomy for grid parsing and path search.
//!
//! Parse failures abort before any search begins; `NoPathFound` is the
//! only error a caller may reasonably recover from.

use thiserror::Error;

/// Malformed grid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input contained no rows at all.
    #[error("grid input contains no rows")]
    EmptyGrid,
    /// A blank line appeared between data rows.
    #[error("blank line inside the grid at row {row}")]
    BlankLine { row: usize },
    /// A row's length differs from the first row's.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A cell was not an ASCII digit.
    #[error("invalid cell {found:?} at row {row}, column {col}: expected a digit")]
    InvalidDigit { row: usize, col: usize, found: char },
}

/// Failures raised while searching a parsed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// A queried position lies outside the grid.
    #[error("position ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Run limits must satisfy `1 <= min_run <= max_run`.
    #[error("invalid run limits: need 1 <= min_run <= max_run, got {min_run}..={max_run}")]
    InvalidRunLimits { min_run: u8, max_run: u8 },
    /// The search finished without any qualifying arrival at the destination.
    #[error("no path to the destination satisfies the run constraints")]
    NoPathFound,
}
