//! Cell coordinates and navigation directions.

use serde::{Deserialize, Serialize};

/// A `(row, column)` pair identifying one cell, 0-indexed.
///
/// Serialized as a `[row, col]` array, the form grid hosts exchange with
/// the JavaScript side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord(pub u32, pub u32);

impl Coord {
    /// Create a coordinate from row and column indices.
    #[must_use]
    pub fn new(row: u32, col: u32) -> Self {
        Coord(row, col)
    }

    /// Row index.
    #[must_use]
    pub fn row(self) -> u32 {
        self.0
    }

    /// Column index.
    #[must_use]
    pub fn col(self) -> u32 {
        self.1
    }

    /// The neighboring coordinate one step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant
    /// (up from row 0, left from column 0). Whether the result lies inside
    /// the grid's current extents is the caller's check.
    #[must_use]
    pub fn shifted(self, direction: Direction) -> Option<Coord> {
        let Coord(row, col) = self;
        match direction {
            Direction::Up => row.checked_sub(1).map(|r| Coord(r, col)),
            Direction::Down => Some(Coord(row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| Coord(row, c)),
            Direction::Right => Some(Coord(row, col + 1)),
        }
    }
}

/// A navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Directions that may extend the grid when navigating past its edge.
    ///
    /// The grid only grows forward (down/right), matching reading order;
    /// up/left stop at row/column 0.
    #[must_use]
    pub fn grows_grid(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// Parse a direction name (`"up"`, `"down"`, `"left"`, `"right"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// The lowercase name of this direction.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}
