use std::{fmt, ops};

use crate::position::square::{Square, BOARD_SIZE, NUM_SQUARES};

/// A set of squares, one bit per square in row-major order.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct BitBoard {
    pub board: u128,
}

impl ops::BitOr for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitor(self, rhs: BitBoard) -> BitBoard {
        BitBoard::from_u128(self.board | rhs.board)
    }
}

impl ops::BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitBoard) {
        self.board |= rhs.board
    }
}

impl ops::BitAnd for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitand(self, rhs: BitBoard) -> BitBoard {
        BitBoard::from_u128(self.board & rhs.board)
    }
}

impl ops::BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitBoard) {
        self.board &= rhs.board
    }
}

impl ops::Not for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn not(self) -> BitBoard {
        BitBoard::from_u128(!self.board & Self::full().board)
    }
}

impl BitBoard {
    #[inline]
    pub const fn empty() -> Self {
        BitBoard { board: 0 }
    }

    #[inline]
    pub const fn full() -> Self {
        BitBoard {
            board: (1 << NUM_SQUARES) - 1,
        }
    }

    #[inline]
    pub const fn from_u128(n: u128) -> Self {
        BitBoard { board: n }
    }

    pub fn from_squares(squares: &[Square]) -> Self {
        squares
            .iter()
            .fold(Self::empty(), |board, square| board.set(*square))
    }

    #[inline]
    pub fn get(self, square: Square) -> bool {
        self.board & (1 << square.into_inner()) != 0
    }

    // Sets the square to true
    #[inline]
    pub fn set(self, square: Square) -> Self {
        BitBoard::from_u128(self.board | 1 << square.into_inner())
    }

    // Sets the square to false
    #[inline]
    pub fn clear(self, square: Square) -> Self {
        BitBoard::from_u128(self.board & !(1 << square.into_inner()))
    }

    /// The squares of one row
    #[inline]
    pub fn row(self, i: u8) -> Self {
        debug_assert!((i as usize) < BOARD_SIZE);
        let mask: u128 = (1 << BOARD_SIZE) - 1;
        BitBoard::from_u128(self.board & (mask << (i as usize * BOARD_SIZE)))
    }

    /// The squares of one column
    #[inline]
    pub fn col(self, i: u8) -> Self {
        debug_assert!((i as usize) < BOARD_SIZE);
        let mask: u128 = 0b1_000000001_000000001_000000001_000000001_000000001_000000001_000000001_000000001;
        BitBoard::from_u128(self.board & (mask << i))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.board == 0
    }

    #[inline]
    pub fn count(self) -> u8 {
        self.board.count_ones() as u8
    }
}

impl IntoIterator for BitBoard {
    type Item = Square;
    type IntoIter = BitBoardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitBoardIter::new(self)
    }
}

/// Iterates over the squares of a bitboard, in `(row, col)` order
pub struct BitBoardIter {
    board: BitBoard,
}

impl BitBoardIter {
    fn new(board: BitBoard) -> Self {
        BitBoardIter { board }
    }
}

impl Iterator for BitBoardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.board.is_empty() {
            None
        } else {
            let square = Square::from_u8(self.board.board.trailing_zeros() as u8);
            self.board = self.board.clear(square);
            Some(square)
        }
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::new(row as u8, col as u8);
                write!(f, "{}", if self.get(square) { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[test]
fn row_and_col_masks_test() {
    let full = BitBoard::full();
    for i in 0..BOARD_SIZE as u8 {
        assert_eq!(full.row(i).count(), 9);
        assert_eq!(full.col(i).count(), 9);
        for square in full.row(i) {
            assert_eq!(square.row(), i);
        }
        for square in full.col(i) {
            assert_eq!(square.col(), i);
        }
    }
    assert_eq!(full.count(), 81);
    assert!((!full).is_empty());
}

#[test]
fn set_clear_iter_test() {
    let squares = [Square::new(0, 3), Square::new(4, 4), Square::new(8, 8)];
    let board = BitBoard::from_squares(&squares);
    assert_eq!(board.into_iter().collect::<Vec<_>>(), squares.to_vec());
    let board = board.clear(Square::new(4, 4));
    assert!(!board.get(Square::new(4, 4)));
    assert_eq!(board.count(), 2);
}
