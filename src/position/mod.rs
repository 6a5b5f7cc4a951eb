//! Tablut rules, along with all required data types.

use std::fmt;
use std::ops::Index;

use board_game_traits::{Color, GameResult};

use crate::error::{Result, TablutError};

pub use bitboard::BitBoard;
pub use mv::Move;
pub use outcome::{Outcome, WIN_UTILITY};
pub use square::{squares_iterator, Camp, Direction, Square, SquareKind, BOARD_SIZE, NUM_SQUARES};

pub mod bitboard;
pub mod capture;
mod move_gen;
mod mv;
mod outcome;
pub mod square;

pub const START_WHITE_PAWNS: [Square; 8] = [
    Square::new(2, 4),
    Square::new(3, 4),
    Square::new(5, 4),
    Square::new(6, 4),
    Square::new(4, 2),
    Square::new(4, 3),
    Square::new(4, 5),
    Square::new(4, 6),
];

/// Number of bytes in a `Position::layout_key`
pub const LAYOUT_KEY_BYTES: usize = 21;

/// A two-player game, seen from the outside.
///
/// Implemented by `Position`, and used by the search functions that do not need Tablut specifics.
pub trait Game: Sized {
    type Move: Clone;

    fn side_to_move(&self) -> Color;

    /// Legal moves in a deterministic order. Empty when the game is over.
    fn actions(&self) -> Vec<Self::Move>;

    /// The position after `mv`, which must be legal
    fn result(&self, mv: &Self::Move) -> Self;

    /// Final value of the game for `player`, or 0 if it is not finished
    fn utility(&self, player: Color) -> f32;

    fn is_terminal(&self) -> bool;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    King,
}

impl Piece {
    pub fn color(self) -> Color {
        match self {
            Piece::WhitePawn | Piece::King => Color::White,
            Piece::BlackPawn => Color::Black,
        }
    }

    pub fn pawn(color: Color) -> Self {
        match color {
            Color::White => Piece::WhitePawn,
            Color::Black => Piece::BlackPawn,
        }
    }

    pub fn from_char(ch: char) -> Option<Option<Self>> {
        match ch {
            'W' | 'w' => Some(Some(Piece::WhitePawn)),
            'B' | 'b' => Some(Some(Piece::BlackPawn)),
            'K' | 'k' => Some(Some(Piece::King)),
            '.' | '*' | '+' => Some(None),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::WhitePawn => 'W',
            Piece::BlackPawn => 'B',
            Piece::King => 'K',
        }
    }
}

/// Parse a side name, `white` or `black`, ignoring case
pub fn parse_side(input: &str) -> Result<Color> {
    match input.trim().to_lowercase().as_str() {
        "white" | "w" => Ok(Color::White),
        "black" | "b" => Ok(Color::Black),
        s => Err(TablutError::InvalidConfiguration(format!(
            "Unknown side \"{}\", expected white or black",
            s
        ))),
    }
}

/// Complete representation of a Tablut position.
///
/// Positions are never modified once built: `result` returns the next position.
#[derive(Clone, PartialEq)]
pub struct Position {
    cells: [Option<Piece>; NUM_SQUARES],
    white_pawns: BitBoard,
    black_pawns: BitBoard,
    king: Option<Square>,
    to_move: Color,
    outcome: Outcome,
}

impl Eq for Position {}

impl Index<Square> for Position {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.into_inner() as usize]
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

impl Position {
    fn empty(to_move: Color) -> Self {
        Position {
            cells: [None; NUM_SQUARES],
            white_pawns: BitBoard::empty(),
            black_pawns: BitBoard::empty(),
            king: None,
            to_move,
            outcome: Outcome::Ongoing,
        }
    }

    pub fn start_position() -> Self {
        let mut position = Self::empty(Color::White);
        position.place_piece(Square::THRONE, Piece::King);
        for square in START_WHITE_PAWNS {
            position.place_piece(square, Piece::WhitePawn);
        }
        for square in squares_iterator().filter(|square| square.is_camp()) {
            position.place_piece(square, Piece::BlackPawn);
        }
        position.outcome = outcome::evaluate_outcome(&position);
        position
    }

    /// Build a position from a grid indexed by `[row][col]`.
    pub fn from_grid(grid: &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE], to_move: Color) -> Result<Self> {
        let mut position = Self::empty(to_move);
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let square = Square::new(row as u8, col as u8);
                match cell {
                    None => (),
                    Some(Piece::King) if position.king.is_some() => {
                        return Err(TablutError::InvalidConfiguration(format!(
                            "Found a second king on {}",
                            square
                        )))
                    }
                    Some(Piece::King) if square.is_camp() => {
                        return Err(TablutError::InvalidConfiguration(format!(
                            "The king cannot stand in a camp, found on {}",
                            square
                        )))
                    }
                    Some(piece) if square.is_throne() && *piece != Piece::King => {
                        return Err(TablutError::InvalidConfiguration(format!(
                            "Only the king can stand on the throne, found {:?}",
                            piece
                        )))
                    }
                    Some(piece) => position.place_piece(square, *piece),
                }
            }
        }
        position.outcome = outcome::evaluate_outcome(&position);
        Ok(position)
    }

    /// Build a position from a 9x9 text diagram, row 1 on top.
    ///
    /// `W` is a white pawn, `B` a black pawn and `K` the king. Empty squares are `.`,
    /// with `*` and `+` also accepted to mark empty camps and the empty throne.
    /// Whitespace within and around rows is ignored.
    pub fn from_diagram(diagram: &str, to_move: Color) -> Result<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(TablutError::InvalidConfiguration(format!(
                "Diagram has {} rows, expected {}",
                rows.len(),
                BOARD_SIZE
            )));
        }
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(TablutError::InvalidConfiguration(format!(
                    "Row {} of the diagram has {} squares, expected {}",
                    i + 1,
                    row.len(),
                    BOARD_SIZE
                )));
            }
            for (j, ch) in row.iter().enumerate() {
                grid[i][j] = Piece::from_char(*ch).ok_or_else(|| {
                    TablutError::InvalidConfiguration(format!(
                        "Unexpected character '{}' in diagram row {}",
                        ch,
                        i + 1
                    ))
                })?;
            }
        }
        Self::from_grid(&grid, to_move)
    }

    pub fn side_to_move(&self) -> Color {
        self.to_move
    }

    pub fn king_square(&self) -> Option<Square> {
        self.king
    }

    pub fn white_pawns(&self) -> BitBoard {
        self.white_pawns
    }

    pub fn black_pawns(&self) -> BitBoard {
        self.black_pawns
    }

    pub fn pawns(&self, color: Color) -> BitBoard {
        match color {
            Color::White => self.white_pawns,
            Color::Black => self.black_pawns,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn winner(&self) -> Option<Color> {
        self.outcome.winner()
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.outcome.game_result()
    }

    /// `+WIN_UTILITY` if White has won, `-WIN_UTILITY` if Black has won, otherwise 0
    pub fn utility(&self) -> f32 {
        self.outcome.utility()
    }

    /// The position after playing `mv`, with captures and the new outcome applied.
    /// The move must be legal, see `try_result` for untrusted input.
    pub fn result(&self, mv: Move) -> Position {
        debug_assert!(self.is_legal(mv), "Illegal move {} on\n{:?}", mv, self);
        let mut position = self.clone();
        let piece = position.remove_piece(mv.from);
        if let Some(piece) = piece {
            position.place_piece(mv.to, piece);
        }
        capture::apply_captures_in_place(&mut position, mv.to);
        position.to_move = !self.to_move;
        position.outcome = outcome::evaluate_outcome(&position);
        debug_assert!(position.is_consistent(), "Inconsistent position\n{:?}", position);
        position
    }

    /// Like `result`, but checks that the move is legal first
    pub fn try_result(&self, mv: Move) -> Result<Position> {
        if self.is_legal(mv) {
            Ok(self.result(mv))
        } else {
            Err(TablutError::IllegalMove(mv))
        }
    }

    /// True if `a` and `b` share a row or column, and every square strictly between them is empty.
    /// The throne blocks the view, even when empty.
    pub fn has_line_of_sight(&self, a: Square, b: Square) -> bool {
        match a.squares_between(b) {
            Some(mut between) => between.all(|square| self[square].is_none() && !square.is_throne()),
            None => false,
        }
    }

    /// Number of pieces of `color` in one quadrant of the board.
    /// Quadrants are 1 = top-left, 2 = top-right, 3 = bottom-left and 4 = bottom-right,
    /// and do not include the central row and column. The king counts as a white piece.
    pub fn pieces_in_quadrant(&self, quadrant: u8, color: Color) -> Result<u8> {
        let (rows, cols) = match quadrant {
            1 => (0..4, 0..4),
            2 => (0..4, 5..9),
            3 => (5..9, 0..4),
            4 => (5..9, 5..9),
            _ => {
                return Err(TablutError::InvalidConfiguration(format!(
                    "Quadrant must be between 1 and 4, got {}",
                    quadrant
                )))
            }
        };
        Ok(self
            .movable_pieces(color)
            .into_iter()
            .filter(|square| rows.contains(&square.row()) && cols.contains(&square.col()))
            .count() as u8)
    }

    /// The quadrant a square belongs to, or `None` on the central row and column
    pub fn quadrant_of(square: Square) -> Option<u8> {
        match (square.row(), square.col()) {
            (4, _) | (_, 4) => None,
            (0..=3, 0..=3) => Some(1),
            (0..=3, _) => Some(2),
            (_, 0..=3) => Some(3),
            _ => Some(4),
        }
    }

    /// A canonical byte representation of the pieces and the side to move.
    ///
    /// Every square uses 2 bits, in row-major order. The side to move is stored in the
    /// highest bit of the last byte, which is otherwise unused.
    pub fn layout_key(&self) -> [u8; LAYOUT_KEY_BYTES] {
        let mut key = [0; LAYOUT_KEY_BYTES];
        for square in squares_iterator() {
            let code = match self[square] {
                None => 0,
                Some(Piece::WhitePawn) => 1,
                Some(Piece::BlackPawn) => 2,
                Some(Piece::King) => 3,
            };
            let bit = square.into_inner() as usize * 2;
            key[bit / 8] |= code << (bit % 8);
        }
        if self.to_move == Color::Black {
            key[LAYOUT_KEY_BYTES - 1] |= 0x80;
        }
        key
    }

    fn place_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self[square].is_none(), "{} is already occupied", square);
        self.cells[square.into_inner() as usize] = Some(piece);
        match piece {
            Piece::WhitePawn => self.white_pawns = self.white_pawns.set(square),
            Piece::BlackPawn => self.black_pawns = self.black_pawns.set(square),
            Piece::King => self.king = Some(square),
        }
    }

    fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.cells[square.into_inner() as usize].take();
        match piece {
            Some(Piece::WhitePawn) => self.white_pawns = self.white_pawns.clear(square),
            Some(Piece::BlackPawn) => self.black_pawns = self.black_pawns.clear(square),
            Some(Piece::King) => self.king = None,
            None => (),
        }
        piece
    }

    /// Check that the grid agrees with the piece sets
    pub(crate) fn is_consistent(&self) -> bool {
        squares_iterator().all(|square| {
            let piece = self[square];
            self.white_pawns.get(square) == (piece == Some(Piece::WhitePawn))
                && self.black_pawns.get(square) == (piece == Some(Piece::BlackPawn))
                && (self.king == Some(square)) == (piece == Some(Piece::King))
        }) && (self[Square::THRONE].is_none() || self.king == Some(Square::THRONE))
    }
}

impl Game for Position {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.to_move
    }

    fn actions(&self) -> Vec<Move> {
        self.legal_moves()
    }

    fn result(&self, mv: &Move) -> Self {
        Position::result(self, *mv)
    }

    fn utility(&self, player: Color) -> f32 {
        player.multiplier() as f32 * self.outcome.utility()
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let square = Square::new(row, col);
                let ch = match self[square] {
                    Some(piece) => piece.to_char(),
                    None if square.is_throne() => '+',
                    None if square.is_camp() => '*',
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ABCDEFGHI")?;
        for (i, line) in self.to_string().lines().enumerate() {
            writeln!(f, "{} {}", i + 1, line)?;
        }
        match self.outcome {
            Outcome::Ongoing => writeln!(f, "{:?} to move", self.to_move),
            outcome => writeln!(f, "{}", outcome),
        }
    }
}
