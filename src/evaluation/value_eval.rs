use board_game_traits::Color;

use crate::evaluation::parameters::*;
use crate::position::{BitBoard, Piece, Position, Square, BOARD_SIZE};

/// Fill in the white feature vector. `coefficients` must be zeroed and hold `NUM_WHITE_FEATURES` values.
pub(crate) fn white_features(position: &Position, coefficients: &mut [f32]) {
    debug_assert_eq!(coefficients.len(), NUM_WHITE_FEATURES);
    coefficients[W_BLACK_PAWNS] = position.black_pawns().count() as f32;
    coefficients[W_WHITE_PAWNS] = position.white_pawns().count() as f32;
    coefficients[W_THREATENED_WHITE_PAWNS] = threatened_white_pawns(position) as f32;

    if let Some(king) = position.king_square() {
        coefficients[W_KING_THRONE_DISTANCE] = king.distance(Square::THRONE);
        coefficients[W_BLACK_SIGHTLINES] = black_sightlines(position, king) as f32;
        coefficients[W_KING_BLACK_NEIGHBOURS] = king
            .neighbours()
            .filter(|(_, square)| position[*square] == Some(Piece::BlackPawn))
            .count() as f32;
        coefficients[W_KING_PSQT] = KING_PSQT[king.into_inner() as usize];
        coefficients[W_KING_ESCAPE_MOVES] = king_escape_moves(position, king) as f32;
        if let Some(quadrant) = Position::quadrant_of(king) {
            coefficients[W_BLACK_IN_KING_QUADRANT] = position
                .pieces_in_quadrant(quadrant, Color::Black)
                .unwrap_or_default() as f32;
        }
    }
}

/// Fill in the black feature vector. `coefficients` must be zeroed and hold `NUM_BLACK_FEATURES` values.
pub(crate) fn black_features(position: &Position, coefficients: &mut [f32]) {
    debug_assert_eq!(coefficients.len(), NUM_BLACK_FEATURES);
    coefficients[B_BLACK_PAWNS] = position.black_pawns().count() as f32;
    coefficients[B_WHITE_PAWNS] = position.white_pawns().count() as f32;

    if let Some(king) = position.king_square() {
        coefficients[B_BLACK_AROUND_KING] = (king_surroundings(king) & position.black_pawns())
            .count() as f32;
        coefficients[B_BLACK_SIGHTLINES] = black_sightlines(position, king) as f32;
        coefficients[B_KING_ESCAPE_MOVES] = king_escape_moves(position, king) as f32;
    }
}

/// Black pawns with a clear line of sight to the king
pub(crate) fn black_sightlines(position: &Position, king: Square) -> u8 {
    let lines = position.black_pawns().row(king.row()) | position.black_pawns().col(king.col());
    lines
        .into_iter()
        .filter(|pawn| position.has_line_of_sight(*pawn, king))
        .count() as u8
}

/// Escape squares the king can reach in one move
pub(crate) fn king_escape_moves(position: &Position, king: Square) -> u8 {
    position
        .destinations(king)
        .filter(|square| square.is_escape())
        .count() as u8
}

/// The up to eight squares surrounding `square`, diagonals included
pub(crate) fn king_surroundings(square: Square) -> BitBoard {
    let mut board = BitBoard::empty();
    for row in square.row().saturating_sub(1)..=(square.row() + 1).min(BOARD_SIZE as u8 - 1) {
        for col in square.col().saturating_sub(1)..=(square.col() + 1).min(BOARD_SIZE as u8 - 1) {
            board = board.set(Square::new(row, col));
        }
    }
    board.clear(square)
}

/// White pawns that some black move could capture right away.
///
/// A pawn is threatened when one side of it is hostile to white and a black pawn
/// can move to the empty square on the other side.
pub(crate) fn threatened_white_pawns(position: &Position) -> u8 {
    let black_reach = position
        .black_pawns()
        .into_iter()
        .fold(BitBoard::empty(), |reach, from| {
            position
                .destinations(from)
                .fold(reach, |reach, to| reach.set(to))
        });

    position
        .white_pawns()
        .into_iter()
        .filter(|pawn| {
            pawn.neighbours().any(|(direction, landing)| {
                black_reach.get(landing)
                    && pawn
                        .go_direction(direction.reverse())
                        .is_some_and(|anchor| is_hostile_to_white(position, anchor))
            })
        })
        .count() as u8
}

fn is_hostile_to_white(position: &Position, square: Square) -> bool {
    square.is_throne() || square.is_camp() || position[square] == Some(Piece::BlackPawn)
}
