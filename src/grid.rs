//! Weighted grid representation parsed from rows of ASCII digits.
//!
//! The grid is immutable once parsed. All movement helpers are
//! bounds-checked so the solver never indexes out of range.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, PathError};

/// Direction of travel across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Every heading, in a fixed order usable for indexing.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The two headings on the perpendicular axis. Turning is only ever
    /// legal onto these; a 180-degree reversal never is.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Position of this heading within [`ALL_DIRECTIONS`].
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

/// Position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Immutable rectangular grid of per-cell entry costs in `[0, 9]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cell costs.
    costs: Vec<u8>,
}

impl Grid {
    /// Parse a grid from rows of equal-length digit strings.
    ///
    /// Trailing blank lines are tolerated; a blank line between data
    /// rows is an error, and every cell must be an ASCII digit.
    pub fn parse(input: &str) -> Result<Grid, ParseError> {
        let mut rows: Vec<&str> = input.lines().collect();
        while matches!(rows.last(), Some(l) if l.is_empty()) {
            rows.pop();
        }

        let mut costs = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for line in rows {
            if line.is_empty() {
                return Err(ParseError::BlankLine { row: height });
            }
            let mut len = 0;
            for (col, ch) in line.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(ParseError::InvalidDigit {
                    row: height,
                    col,
                    found: ch,
                })?;
                costs.push(digit as u8);
                len += 1;
            }
            if height == 0 {
                width = len;
            } else if len != width {
                return Err(ParseError::RaggedRow {
                    row: height,
                    len,
                    expected: width,
                });
            }
            height += 1;
        }

        if height == 0 {
            return Err(ParseError::EmptyGrid);
        }
        Ok(Grid {
            width,
            height,
            costs,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Entry cost of the cell at `pos`, if it lies on the grid.
    pub fn get(&self, pos: Position) -> Option<u8> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.costs[pos.y as usize * self.width + pos.x as usize])
    }

    /// Entry cost of the cell at `pos`.
    pub fn cost(&self, pos: Position) -> Result<u8, PathError> {
        self.get(pos).ok_or(PathError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        })
    }

    /// One step from `pos` along `heading`, if the target is on the grid.
    pub fn step(&self, pos: Position, heading: Direction) -> Option<Position> {
        let (dx, dy) = heading.delta();
        let next = Position::new(pos.x + dx, pos.y + dy);
        self.contains(next).then_some(next)
    }

    pub fn top_left(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(self.width as i32 - 1, self.height as i32 - 1)
    }
}
