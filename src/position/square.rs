use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TablutError;

use self::Direction::*;

pub const BOARD_SIZE: usize = 9;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A location on the board. Can be used to index a `Position`.
///
/// Squares are ordered row-major, so sorting squares sorts them by `(row, col)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square {
    inner: u8,
}

impl Square {
    pub const THRONE: Square = Square::new(4, 4);

    pub const fn from_u8(inner: u8) -> Self {
        assert!((inner as usize) < NUM_SQUARES);
        Square { inner }
    }

    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Square {
            inner: row * BOARD_SIZE as u8 + col,
        }
    }

    /// Checked constructor for coordinates coming from outside the engine
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub const fn into_inner(self) -> u8 {
        self.inner
    }

    pub const fn row(self) -> u8 {
        self.inner / BOARD_SIZE as u8
    }

    pub const fn col(self) -> u8 {
        self.inner % BOARD_SIZE as u8
    }

    pub const fn kind(self) -> SquareKind {
        square_kind(self.row(), self.col())
    }

    pub const fn is_throne(self) -> bool {
        self.inner == Self::THRONE.inner
    }

    pub const fn camp(self) -> Option<Camp> {
        match self.kind() {
            SquareKind::Camp(camp) => Some(camp),
            _ => None,
        }
    }

    pub const fn is_camp(self) -> bool {
        self.camp().is_some()
    }

    pub const fn is_escape(self) -> bool {
        matches!(self.kind(), SquareKind::Escape)
    }

    /// True for the four squares orthogonally adjacent to the throne
    pub const fn is_next_to_throne(self) -> bool {
        let (row, col) = (self.row(), self.col());
        (row == 4 && (col == 3 || col == 5)) || (col == 4 && (row == 3 || row == 5))
    }

    pub const fn go_direction(self, direction: Direction) -> Option<Self> {
        self.jump_direction(direction, 1)
    }

    pub const fn jump_direction(self, direction: Direction, len: u8) -> Option<Self> {
        let row = self.row();
        let col = self.col();
        match direction {
            North => {
                if let Some(new_row) = row.checked_sub(len) {
                    Some(Square::new(new_row, col))
                } else {
                    None
                }
            }
            West => {
                if let Some(new_col) = col.checked_sub(len) {
                    Some(Square::new(row, new_col))
                } else {
                    None
                }
            }
            East => {
                if col as usize + (len as usize) < BOARD_SIZE {
                    Some(Square::new(row, col + len))
                } else {
                    None
                }
            }
            South => {
                if row as usize + (len as usize) < BOARD_SIZE {
                    Some(Square::new(row + len, col))
                } else {
                    None
                }
            }
        }
    }

    /// Orthogonal neighbours, with the direction leading to each of them
    pub fn neighbours(self) -> impl Iterator<Item = (Direction, Square)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.go_direction(direction)?)))
    }

    /// Squares strictly between `self` and `other`, if they share a row or column
    pub fn squares_between(self, other: Square) -> Option<impl Iterator<Item = Square>> {
        let direction = self.direction_to(other)?;
        let distance = self.row().abs_diff(other.row()) + self.col().abs_diff(other.col());
        Some((1..distance).filter_map(move |len| self.jump_direction(direction, len)))
    }

    /// The direction leading from `self` towards `other`, if they share a row or column
    pub fn direction_to(self, other: Square) -> Option<Direction> {
        if self == other {
            None
        } else if self.row() == other.row() {
            Some(if other.col() > self.col() { East } else { West })
        } else if self.col() == other.col() {
            Some(if other.row() > self.row() { South } else { North })
        } else {
            None
        }
    }

    /// Euclidean distance to another square
    pub fn distance(self, other: Square) -> f32 {
        let dr = self.row() as f32 - other.row() as f32;
        let dc = self.col() as f32 - other.col() as f32;
        (dr * dr + dc * dc).sqrt()
    }

    /// Parse a square in server notation: column letter `A-I` followed by row number `1-9`
    pub fn parse_square(input: &str) -> Result<Square, TablutError> {
        let bytes = input.as_bytes();
        if bytes.len() != 2 {
            return Err(TablutError::MalformedMoveNotation(format!(
                "Couldn't parse square \"{}\"",
                input
            )));
        }
        let col = bytes[0].to_ascii_uppercase().wrapping_sub(b'A');
        let row = bytes[1].wrapping_sub(b'1');
        Square::try_new(row as usize, col as usize).ok_or_else(|| {
            TablutError::MalformedMoveNotation(format!(
                "Square \"{}\" is outside the board",
                input
            ))
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (self.col() + b'A') as char)?;
        write!(f, "{}", self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = TablutError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Square::parse_square(input)
    }
}

/// Iterates over all board squares, in `(row, col)` order.
pub fn squares_iterator() -> impl Iterator<Item = Square> {
    (0..NUM_SQUARES as u8).map(Square::from_u8)
}

/// One of the four cardinal directions on the board. North is towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    West,
    East,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [North, West, East, South];

    pub const fn reverse(self) -> Direction {
        match self {
            North => South,
            West => East,
            East => West,
            South => North,
        }
    }
}

/// The four citadels, named after the board edge they sit on
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Camp {
    North,
    West,
    East,
    South,
}

/// The fixed role a square plays in the rules
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SquareKind {
    Ordinary,
    Throne,
    Camp(Camp),
    /// Edge squares where the king escapes
    Escape,
}

const fn square_kind(row: u8, col: u8) -> SquareKind {
    match (row, col) {
        (4, 4) => SquareKind::Throne,
        (0, 3..=5) | (1, 4) => SquareKind::Camp(Camp::North),
        (8, 3..=5) | (7, 4) => SquareKind::Camp(Camp::South),
        (3..=5, 0) | (4, 1) => SquareKind::Camp(Camp::West),
        (3..=5, 8) | (4, 7) => SquareKind::Camp(Camp::East),
        (0 | 8, 1 | 2 | 6 | 7) | (1 | 2 | 6 | 7, 0 | 8) => SquareKind::Escape,
        _ => SquareKind::Ordinary,
    }
}
