//! Captures resolved after a piece lands on a square.

use arrayvec::ArrayVec;
use board_game_traits::Color;

use crate::position::{Piece, Position, Square};

/// Apply every capture triggered by the piece that just landed on `landed`.
pub fn apply_captures(mut position: Position, landed: Square) -> Position {
    apply_captures_in_place(&mut position, landed);
    position
}

/// In-place version of `apply_captures`. Returns the squares that were emptied.
pub fn apply_captures_in_place(position: &mut Position, landed: Square) -> ArrayVec<Square, 5> {
    let mut captured = ArrayVec::new();
    let mover = match position[landed] {
        Some(piece) => piece.color(),
        None => return captured,
    };

    for (direction, neighbour) in landed.neighbours() {
        let is_enemy_pawn = matches!(
            position[neighbour],
            Some(piece) if piece != Piece::King && piece.color() != mover
        );
        if !is_enemy_pawn {
            continue;
        }
        if let Some(anchor) = neighbour.go_direction(direction) {
            if is_hostile_to_pawn(position, anchor, mover) {
                captured.push(neighbour);
            }
        }
    }

    if mover == Color::Black {
        if let Some(king) = position.king_square() {
            if king.neighbours().any(|(_, square)| square == landed)
                && is_king_captured(position, king, landed)
            {
                captured.push(king);
            }
        }
    }

    for square in captured.iter() {
        position.remove_piece(*square);
    }
    captured
}

/// Whether `anchor` closes a custodial capture together with a piece of `mover`.
/// The throne and the camps are hostile to every pawn, whatever stands on them.
fn is_hostile_to_pawn(position: &Position, anchor: Square, mover: Color) -> bool {
    if anchor.is_throne() || anchor.is_camp() {
        return true;
    }
    matches!(position[anchor], Some(piece) if piece.color() == mover)
}

fn is_king_captured(position: &Position, king: Square, landed: Square) -> bool {
    let is_black = |square: Square| position[square] == Some(Piece::BlackPawn);
    if king.is_throne() {
        king.neighbours().all(|(_, square)| is_black(square))
    } else if king.is_next_to_throne() {
        king.neighbours()
            .filter(|(_, square)| !square.is_throne())
            .all(|(_, square)| is_black(square))
    } else {
        let opposite = landed
            .direction_to(king)
            .and_then(|direction| king.go_direction(direction));
        match opposite {
            Some(square) => is_black(square) || (square.is_camp() && position[square].is_none()),
            None => false,
        }
    }
}
