use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TablutError;
use crate::position::Square;

/// A move of one piece along a row or column.
///
/// Moves sort by `(from, to)`, which is also the order move generation returns them in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Number of squares travelled, or `None` for a move that is not along a row or column
    pub fn len(self) -> Option<u8> {
        self.from.direction_to(self.to)?;
        Some(self.from.row().abs_diff(self.to.row()) + self.from.col().abs_diff(self.to.col()))
    }

    /// Parse a move written as `<col><row>-<col><row>`, for example `E3-F3`
    pub fn from_string(input: &str) -> Result<Self, TablutError> {
        let input = input.trim();
        let (from, to) = input.split_once('-').ok_or_else(|| {
            TablutError::MalformedMoveNotation(format!(
                "Couldn't parse move \"{}\": expected two squares separated by '-'",
                input
            ))
        })?;
        let from = Square::parse_square(from.trim())?;
        let to = Square::parse_square(to.trim())?;
        if from.direction_to(to).is_none() {
            return Err(TablutError::MalformedMoveNotation(format!(
                "Couldn't parse move \"{}\": pieces only move along rows and columns",
                input
            )));
        }
        Ok(Move { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = TablutError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Move::from_string(input)
    }
}
