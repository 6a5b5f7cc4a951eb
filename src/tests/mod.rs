#[cfg(test)]
mod capture_tests;
#[cfg(test)]
mod evaluation_tests;
#[cfg(test)]
mod search_tests;

#[cfg(test)]
use board_game_traits::Color;

#[cfg(test)]
use crate::position::{Move, Position};

#[cfg(test)]
fn position_from_diagram(diagram: &str, to_move: Color) -> Position {
    Position::from_diagram(diagram, to_move).unwrap()
}

#[cfg(test)]
fn do_moves_and_check_validity(position: &mut Position, move_strings: &[&str]) {
    for move_string in move_strings.iter() {
        let mv = Move::from_string(move_string).unwrap();
        let moves = position.legal_moves();
        assert!(
            moves.contains(&mv),
            "Move {} was not among legal moves: {:?}\n{:?}",
            mv,
            moves,
            position
        );
        *position = position.result(mv);
    }
}

/// Parse a diagram, play the moves and return the final position
#[cfg(test)]
fn position_after_moves(diagram: &str, to_move: Color, move_strings: &[&str]) -> Position {
    let mut position = position_from_diagram(diagram, to_move);
    do_moves_and_check_validity(&mut position, move_strings);
    position
}
