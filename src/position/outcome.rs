use std::fmt;

use board_game_traits::{Color, GameResult};

use crate::position::Position;

/// Utility of a won game, from White's perspective
pub const WIN_UTILITY: f32 = 1.0;

/// The state of a game, including how it was decided
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Outcome {
    #[default]
    Ongoing,
    WhiteWinByEscape,
    WhiteWinByElimination,
    WhiteWinByImmobilization,
    BlackWinByCapture,
    BlackWinByElimination,
    BlackWinByImmobilization,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        use Outcome::*;
        match self {
            Ongoing => None,
            WhiteWinByEscape | WhiteWinByElimination | WhiteWinByImmobilization => {
                Some(Color::White)
            }
            BlackWinByCapture | BlackWinByElimination | BlackWinByImmobilization => {
                Some(Color::Black)
            }
        }
    }

    pub fn game_result(self) -> Option<GameResult> {
        self.winner().map(|color| match color {
            Color::White => GameResult::WhiteWin,
            Color::Black => GameResult::BlackWin,
        })
    }

    /// `+WIN_UTILITY` for a White win, `-WIN_UTILITY` for a Black win, 0 otherwise
    pub fn utility(self) -> f32 {
        match self.winner() {
            Some(color) => color.multiplier() as f32 * WIN_UTILITY,
            None => 0.0,
        }
    }

    fn elimination_win(winner: Color) -> Self {
        match winner {
            Color::White => Outcome::WhiteWinByElimination,
            Color::Black => Outcome::BlackWinByElimination,
        }
    }

    fn immobilization_win(winner: Color) -> Self {
        match winner {
            Color::White => Outcome::WhiteWinByImmobilization,
            Color::Black => Outcome::BlackWinByImmobilization,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Ongoing => "game in progress",
            Outcome::WhiteWinByEscape => "White wins, the king escaped",
            Outcome::WhiteWinByElimination => "White wins, Black has no pawns left",
            Outcome::WhiteWinByImmobilization => "White wins, Black cannot move",
            Outcome::BlackWinByCapture => "Black wins, the king was captured",
            Outcome::BlackWinByElimination => "Black wins, White has no pieces left",
            Outcome::BlackWinByImmobilization => "Black wins, White cannot move",
        };
        write!(f, "{}", s)
    }
}

/// Decide the outcome of a position from its pieces and side to move.
/// Checks are applied in a fixed order, and the first one that matches decides the game.
pub(crate) fn evaluate_outcome(position: &Position) -> Outcome {
    let king = match position.king_square() {
        None => return Outcome::BlackWinByCapture,
        Some(king) => king,
    };
    if king.is_escape() {
        return Outcome::WhiteWinByEscape;
    }
    let side_to_move = position.side_to_move();
    if position.movable_pieces(side_to_move).is_empty() {
        return Outcome::elimination_win(!side_to_move);
    }
    if !position.has_legal_move(side_to_move) {
        return Outcome::immobilization_win(!side_to_move);
    }
    Outcome::Ongoing
}
