use std::cell::Cell;
use std::time::{Duration, Instant};

use board_game_traits::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::TablutError;
use crate::evaluation;
use crate::minmax::minmax;
use crate::position::{Move, Outcome, Position};
use crate::search::{
    self, alpha_beta, best_one_ply_move, play_move_time, select_move, SearchSettings, WIN_SCORE,
    WIN_THRESHOLD,
};
use crate::tests::{position_after_moves, position_from_diagram};

const OPEN_KING: &str = "
    .........
    .........
    ..K......
    .........
    .........
    .........
    ......W..
    B........
    ....B...B";

const SURROUNDED_KING: &str = "
    .........
    ..B......
    .BK..B...
    ..W......
    .........
    .....B...
    ......WB.
    .........
    ........B";

const KING_IN_DANGER: &str = "
    .........
    ..B......
    .BK...B..
    .........
    .........
    .........
    ...B.....
    .........
    ..W...W.B";

fn eval(position: &Position, side: Color) -> f32 {
    evaluation::evaluate(position, side)
}

fn deadline_in(duration: Duration) -> Instant {
    Instant::now() + duration
}

fn black_wins_immediately(position: &Position) -> bool {
    position
        .legal_moves()
        .into_iter()
        .any(|mv| position.result(mv).winner() == Some(Color::Black))
}

fn assert_same_as_minmax(position: &Position, depth: u16) {
    let (_, minmax_score) = minmax(position, depth, &eval);
    for use_tt in [false, true] {
        let settings = SearchSettings::default().transposition_table(use_tt);
        let (best_move, score) = alpha_beta(position, depth, &settings);
        assert_eq!(
            score, minmax_score,
            "Alpha-beta (tt: {}) scored {} at depth {}, minmax scored {}\n{:?}",
            use_tt, score, depth, minmax_score, position
        );
        assert!(position.is_legal(best_move.unwrap()));
    }
}

#[test]
fn alpha_beta_equals_minmax_small_positions_test() {
    for diagram in [OPEN_KING, SURROUNDED_KING, KING_IN_DANGER] {
        for to_move in [Color::White, Color::Black] {
            let position = position_from_diagram(diagram, to_move);
            for depth in 1..=3 {
                assert_same_as_minmax(&position, depth);
            }
        }
    }
}

#[test]
fn alpha_beta_equals_minmax_start_position_test() {
    let position = Position::start_position();
    for depth in 1..=2 {
        assert_same_as_minmax(&position, depth);
    }
}

#[test]
fn minmax_only_evaluates_leaves_test() {
    let position = Position::start_position();
    let calls = Cell::new(0);
    let counting_eval = |position: &Position, side: Color| {
        calls.set(calls.get() + 1);
        eval(position, side)
    };
    minmax(&position, 1, &counting_eval);
    assert_eq!(calls.get(), position.legal_moves().len());
}

#[test]
fn alpha_beta_on_finished_game_test() {
    let position = position_after_moves(OPEN_KING, Color::White, &["C3-A3"]);
    assert_eq!(position.outcome(), Outcome::WhiteWinByEscape);
    let (best_move, score) = alpha_beta(&position, 3, &SearchSettings::default());
    assert_eq!(best_move, None);
    // Black is to move, and has lost
    assert_eq!(score, -WIN_SCORE);
    assert_eq!(minmax(&position, 3, &eval), (None, -WIN_SCORE));
}

#[test]
fn select_move_takes_immediate_escape_test() {
    let position = position_from_diagram(OPEN_KING, Color::White);
    let settings = SearchSettings::default().max_depth(3);
    let result = select_move(&position, deadline_in(Duration::from_secs(30)), &settings).unwrap();
    assert_eq!(
        position.result(result.best_move).outcome(),
        Outcome::WhiteWinByEscape,
        "Played {} instead of escaping\n{:?}",
        result.best_move,
        position
    );
    assert!(result.score > WIN_THRESHOLD);
}

#[test]
fn select_move_captures_king_test() {
    let position = position_from_diagram(
        "
        .........
        .........
        .........
        ....B....
        ...BKB...
        .B.......
        .........
        ......W..
        ..W......",
        Color::Black,
    );
    let result = select_move(
        &position,
        deadline_in(Duration::from_secs(30)),
        &SearchSettings::default(),
    )
    .unwrap();
    assert_eq!(result.best_move, Move::from_string("B6-E6").unwrap());
}

#[test]
fn select_move_avoids_immediate_loss_test() {
    let position = position_from_diagram(KING_IN_DANGER, Color::White);
    assert!(black_wins_immediately(&position.result(
        Move::from_string("G9-G8").unwrap()
    )));
    for depth in 2..=3 {
        let settings = SearchSettings::default().max_depth(depth);
        let result =
            select_move(&position, deadline_in(Duration::from_secs(60)), &settings).unwrap();
        let after = position.result(result.best_move);
        assert!(
            !black_wins_immediately(&after),
            "{} lets Black win at depth {}\n{:?}",
            result.best_move,
            depth,
            position
        );
        assert_eq!(result.depth, depth);
    }
}

#[test]
fn select_move_on_finished_game_test() {
    let position = position_after_moves(OPEN_KING, Color::White, &["C3-A3"]);
    let result = select_move(
        &position,
        deadline_in(Duration::from_secs(5)),
        &SearchSettings::default(),
    );
    assert_eq!(
        result,
        Err(TablutError::GameOver(Outcome::WhiteWinByEscape))
    );
    assert!(play_move_time(&position, &SearchSettings::default()).is_err());
    assert!(best_one_ply_move(&position, &SearchSettings::default()).is_err());
    assert!(search::random_move(&position, &mut StdRng::seed_from_u64(0)).is_err());
}

#[test]
fn select_move_respects_deadline_test() {
    let position = Position::start_position();
    let settings = SearchSettings::default().max_depth(12);
    let start_time = Instant::now();
    let result = select_move(&position, start_time + Duration::from_millis(300), &settings).unwrap();
    let elapsed = start_time.elapsed();
    assert!(
        elapsed < Duration::from_secs(3),
        "Search took {:.2}s",
        elapsed.as_secs_f32()
    );
    assert!(position.is_legal(result.best_move));
    assert!(result.depth < 12);
}

#[test]
fn expired_deadline_still_returns_legal_move_test() {
    let position = Position::start_position();
    let result = select_move(&position, Instant::now(), &SearchSettings::default()).unwrap();
    assert!(position.is_legal(result.best_move));
    assert_eq!(result.depth, 0);
    let one_ply = best_one_ply_move(&position, &SearchSettings::default()).unwrap();
    assert_eq!(result.score, one_ply.score);
}

#[test]
fn play_move_time_test() {
    let position = Position::start_position();
    let settings = SearchSettings::default()
        .max_depth(2)
        .time_budget(Duration::from_secs(20))
        .safety_margin(Duration::from_secs(2));
    let result = play_move_time(&position, &settings).unwrap();
    assert!(position.is_legal(result.best_move));
    assert_eq!(result.depth, 2);

    let (_, score) = alpha_beta(&position, 2, &settings);
    assert_eq!(result.score, score);
}

#[test]
fn random_move_is_legal_test() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut position = Position::start_position();
    for _ in 0..50 {
        if position.is_terminal() {
            break;
        }
        let mv = search::random_move(&position, &mut rng).unwrap();
        assert!(position.is_legal(mv));
        position = position.result(mv);
    }
}

#[test]
fn invalid_settings_test() {
    let position = Position::start_position();
    let settings = SearchSettings::default().add_white_value_params(vec![1.0, 2.0]);
    assert!(matches!(
        select_move(&position, deadline_in(Duration::from_secs(5)), &settings),
        Err(TablutError::InvalidConfiguration(_))
    ));
    let settings = SearchSettings::default().max_depth(0);
    assert!(settings.validate().is_err());
    assert!(SearchSettings::default().validate().is_ok());
}
