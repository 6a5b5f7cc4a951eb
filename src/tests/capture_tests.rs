use board_game_traits::Color;

use crate::position::capture::apply_captures;
use crate::position::{Move, Outcome, Piece, Position, Square};
use crate::tests::{position_after_moves, position_from_diagram};

fn sq(s: &str) -> Square {
    Square::parse_square(s).unwrap()
}

#[test]
fn white_captures_black_pawn_test() {
    let position = position_after_moves(
        "
        .........
        .........
        ..WB...W.
        .........
        ....K....
        .........
        .........
        .........
        B.......B",
        Color::White,
        &["H3-E3"],
    );
    assert_eq!(position[sq("D3")], None, "{:?}", position);
    assert_eq!(position[sq("E3")], Some(Piece::WhitePawn));
    assert_eq!(position.black_pawns().count(), 2);
    assert_eq!(position.outcome(), Outcome::Ongoing);
    assert_eq!(position.utility(), 0.0);
}

#[test]
fn black_captures_white_pawn_test() {
    let position = position_after_moves(
        "
        .........
        .........
        ..BW...B.
        .........
        ....K....
        ......W..
        .........
        .........
        ........B",
        Color::Black,
        &["H3-E3"],
    );
    assert_eq!(position[sq("D3")], None, "{:?}", position);
    assert_eq!(position.white_pawns().count(), 1);
    assert_eq!(position.utility(), 0.0);
}

#[test]
fn empty_throne_captures_test() {
    let position = position_after_moves(
        "
        .........
        .........
        W........
        ....B....
        .........
        .........
        ......K..
        .........
        B.......B",
        Color::White,
        &["A3-E3"],
    );
    assert_eq!(position[sq("E4")], None, "{:?}", position);
    assert_eq!(position.black_pawns().count(), 2);
}

#[test]
fn occupied_throne_captures_for_both_sides_test() {
    let position = position_after_moves(
        "
        .........
        .........
        W........
        ....B....
        ....K....
        .........
        .........
        .........
        B.......B",
        Color::White,
        &["A3-E3"],
    );
    assert_eq!(position[sq("E4")], None, "{:?}", position);

    // The king on the throne does not protect a white pawn next to it
    let position = position_after_moves(
        "
        .........
        .........
        ..B......
        .........
        ...WK....
        .........
        .........
        .........
        ......W.B",
        Color::Black,
        &["C3-C5"],
    );
    assert_eq!(position[sq("D5")], None, "{:?}", position);
    assert_eq!(position.king_square(), Some(Square::THRONE));
    assert_eq!(position.white_pawns().count(), 1);
    assert_eq!(position.outcome(), Outcome::Ongoing);
}

#[test]
fn occupied_camp_captures_test() {
    let position = position_after_moves(
        "
        ...B.....
        ...B.....
        .......W.
        .........
        ....K....
        .........
        .........
        .........
        ........B",
        Color::White,
        &["H3-D3"],
    );
    assert_eq!(position[sq("D2")], None, "{:?}", position);
    assert_eq!(position[sq("D1")], Some(Piece::BlackPawn));
    assert_eq!(position.black_pawns().count(), 2);
}

#[test]
fn camp_pawn_is_captured_against_its_own_camp_test() {
    let position = Position::start_position().result(Move::from_string("E3-A3").unwrap());
    assert_eq!(position[sq("A4")], None, "{:?}", position);
    assert_eq!(position[sq("A5")], Some(Piece::BlackPawn));
    assert_eq!(position.black_pawns().count(), 15);
}

#[test]
fn empty_camp_captures_test() {
    let position = position_after_moves(
        "
        ..W......
        .........
        .........
        .........
        .B..K....
        .........
        .........
        ......W..
        ........B",
        Color::Black,
        &["B5-B1"],
    );
    assert_eq!(position[sq("C1")], None, "{:?}", position);
    assert_eq!(position.white_pawns().count(), 1);
}

#[test]
fn king_flanks_black_pawn_test() {
    let position = position_after_moves(
        "
        .........
        .........
        W....BK..
        .........
        .........
        .........
        .........
        .........
        B.......B",
        Color::White,
        &["A3-E3"],
    );
    assert_eq!(position[sq("F3")], None, "{:?}", position);
    assert_eq!(position.king_square(), Some(sq("G3")));
}

#[test]
fn double_capture_test() {
    let position = position_after_moves(
        "
        .........
        .........
        ..WB....W
        ....B....
        ....K....
        .........
        .........
        .........
        B.......B",
        Color::White,
        &["I3-E3"],
    );
    assert_eq!(position[sq("D3")], None, "{:?}", position);
    assert_eq!(position[sq("E4")], None, "{:?}", position);
    assert_eq!(position.black_pawns().count(), 2);
}

#[test]
fn moving_between_two_enemies_is_safe_test() {
    let position = position_after_moves(
        "
        .........
        .........
        ..B.B....
        .........
        ....K..W.
        .........
        ...W.....
        .........
        B.......B",
        Color::White,
        &["D7-D3"],
    );
    assert_eq!(position[sq("D3")], Some(Piece::WhitePawn), "{:?}", position);
    assert_eq!(position.black_pawns().count(), 4);
}

#[test]
fn king_on_throne_needs_four_attackers_test() {
    let diagram = "
        .........
        .........
        .....B...
        ....B....
        ...BK....
        .B.......
        .........
        .........
        ..W...W..";
    let position = position_after_moves(diagram, Color::Black, &["F3-F5"]);
    assert_eq!(position.king_square(), Some(Square::THRONE), "{:?}", position);
    assert_eq!(position.outcome(), Outcome::Ongoing);

    let position = position_after_moves(diagram, Color::Black, &["F3-F5", "G9-G8", "B6-E6"]);
    assert_eq!(position.king_square(), None, "{:?}", position);
    assert_eq!(position[Square::THRONE], None);
    assert_eq!(position.outcome(), Outcome::BlackWinByCapture);
}

#[test]
fn king_next_to_throne_needs_three_attackers_test() {
    let captured = position_after_moves(
        "
        .........
        .........
        ....B....
        ...BK..B.
        .........
        .........
        .........
        .........
        ..W...W..",
        Color::Black,
        &["H4-F4"],
    );
    assert_eq!(captured.outcome(), Outcome::BlackWinByCapture, "{:?}", captured);

    let not_captured = position_after_moves(
        "
        .........
        .........
        .........
        ...BK..B.
        .........
        .........
        .........
        .........
        ..W...W..",
        Color::Black,
        &["H4-F4"],
    );
    assert_eq!(not_captured.king_square(), Some(sq("E4")), "{:?}", not_captured);
    assert_eq!(not_captured.outcome(), Outcome::Ongoing);
}

#[test]
fn king_away_from_throne_is_captured_by_two_test() {
    let position = position_after_moves(
        "
        .........
        .........
        .BK......
        .........
        .........
        .........
        ...B.....
        .........
        ..W...W..",
        Color::Black,
        &["D7-D3"],
    );
    assert_eq!(position.outcome(), Outcome::BlackWinByCapture, "{:?}", position);
    assert_eq!(position.winner(), Some(Color::Black));
    assert_eq!(position.utility(), -1.0);
}

#[test]
fn empty_camp_helps_capture_king_test() {
    let position = position_after_moves(
        "
        .........
        ...K.....
        .........
        .........
        .........
        .........
        ...B.....
        .........
        ..W...W..",
        Color::Black,
        &["D7-D3"],
    );
    assert_eq!(position.outcome(), Outcome::BlackWinByCapture, "{:?}", position);
}

#[test]
fn king_walking_between_attackers_is_safe_test() {
    let position = position_after_moves(
        "
        .........
        .........
        .B.B.....
        ..K......
        .........
        .........
        .........
        .........
        ..W...W.B",
        Color::White,
        &["C4-C3"],
    );
    assert_eq!(position.king_square(), Some(sq("C3")), "{:?}", position);
    assert_eq!(position.outcome(), Outcome::Ongoing);
}

#[test]
fn apply_captures_is_pure_test() {
    let position = position_from_diagram(
        "
        .........
        .........
        ..WBW....
        .........
        ....K....
        .........
        .........
        .........
        B.......B",
        Color::Black,
    );
    let after = apply_captures(position.clone(), sq("E3"));
    assert_eq!(after[sq("D3")], None);
    assert_eq!(position[sq("D3")], Some(Piece::BlackPawn));
    // A square with nothing on it captures nothing
    assert_eq!(apply_captures(position.clone(), sq("A1")), position);
}

#[test]
fn result_is_deterministic_test() {
    let position = Position::start_position();
    for mv in position.legal_moves() {
        assert_eq!(position.result(mv), position.result(mv));
    }
    assert_eq!(position, Position::start_position());
}
