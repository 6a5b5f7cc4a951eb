use board_game_traits::Color;

use crate::evaluation::parameters::*;
use crate::evaluation::{evaluate, evaluate_with_params, features};
use crate::position::Position;
use crate::tests::position_from_diagram;

fn assert_features(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-4, "Feature {} was {}, expected {}", i, a, e);
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "Got {}, expected {}", actual, expected);
}

#[test]
fn start_position_features_test() {
    let position = Position::start_position();
    assert_features(
        &features(&position, Color::White),
        &[16.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    assert_features(&features(&position, Color::Black), &[16.0, 8.0, 0.0, 0.0, 0.0]);
    assert_close(evaluate(&position, Color::White), -4.0);
    assert_close(evaluate(&position, Color::Black), 13.276848);
}

#[test]
fn open_king_features_test() {
    let position = position_from_diagram(
        "
        .........
        .........
        ..K......
        .........
        .........
        .........
        ......W..
        B........
        ....B...B",
        Color::White,
    );
    assert_features(
        &features(&position, Color::White),
        &[3.0, 1.0, 8.0f32.sqrt(), 0.0, 0.0, 0.8, 0.0, 4.0, 0.0],
    );
    assert_features(&features(&position, Color::Black), &[3.0, 1.0, 0.0, 0.0, 4.0]);
    assert_close(evaluate(&position, Color::White), 32.714214);
    assert_close(evaluate(&position, Color::Black), -4.530273);
}

#[test]
fn surrounded_king_features_test() {
    let position = position_from_diagram(
        "
        .........
        ..B......
        .BK..B...
        ..W......
        .........
        .....B...
        ......WB.
        .........
        ........B",
        Color::White,
    );
    let white = features(&position, Color::White);
    assert_eq!(white[W_BLACK_SIGHTLINES], 3.0);
    assert_eq!(white[W_KING_BLACK_NEIGHBOURS], 2.0);
    assert_eq!(white[W_THREATENED_WHITE_PAWNS], 1.0);
    assert_eq!(white[W_KING_ESCAPE_MOVES], 0.0);
    assert_eq!(white[W_BLACK_IN_KING_QUADRANT], 2.0);
    assert_features(
        &features(&position, Color::Black),
        &[6.0, 2.0, 2.0, 3.0, 0.0],
    );
    assert_close(evaluate(&position, Color::White), -6.585786);
    assert_close(evaluate(&position, Color::Black), 9.617811);
}

#[test]
fn king_closer_to_escape_is_better_for_white_test() {
    let near_edge = position_from_diagram(
        "
        .........
        .........
        ..K......
        .........
        .........
        .........
        ......W..
        B........
        ....B...B",
        Color::White,
    );
    let center = position_from_diagram(
        "
        .........
        .........
        .........
        .........
        ....K....
        .........
        ......W..
        B........
        ....B...B",
        Color::White,
    );
    assert!(evaluate(&near_edge, Color::White) > evaluate(&center, Color::White));
    assert!(evaluate(&near_edge, Color::Black) < evaluate(&center, Color::Black));
}

#[test]
fn custom_params_test() {
    let position = Position::start_position();
    let ones = [1.0; NUM_WHITE_FEATURES];
    assert_close(evaluate_with_params(&position, Color::White, &ones), 24.0);
    let only_white_pawns = [0.0, -2.0, 0.0, 0.0, 0.0];
    assert_close(
        evaluate_with_params(&position, Color::Black, &only_white_pawns),
        -16.0,
    );
    assert_eq!(value_params(Color::Black).len(), NUM_BLACK_FEATURES);
}

#[test]
fn king_psqt_is_symmetric_test() {
    for row in 0..9 {
        for col in 0..9 {
            let value = KING_PSQT[row * 9 + col];
            assert_eq!(value, KING_PSQT[(8 - row) * 9 + col]);
            assert_eq!(value, KING_PSQT[row * 9 + 8 - col]);
            assert_eq!(value, KING_PSQT[col * 9 + row]);
        }
    }
}
