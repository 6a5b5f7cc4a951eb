//! Move selection: iterative deepening alpha-beta under a wall-clock deadline.

use std::thread;
use std::time::{Duration, Instant};

use board_game_traits::Color;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TablutError};
use crate::evaluation::parameters::{self, BLACK_VALUE_PARAMS, WHITE_VALUE_PARAMS};
use crate::position::{Move, Position};

use alpha_beta::{SearchTimeout, Searcher};

mod alpha_beta;
mod tt;

/// Type alias for position scores, from the searching player's perspective
pub type Score = f32;

/// Score of a won game at the root. A win `n` plies away scores `WIN_SCORE - n`.
pub const WIN_SCORE: Score = 1_000_000.0;
/// Scores beyond this are forced wins or losses
pub const WIN_THRESHOLD: Score = 100_000.0;

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchSettings {
    max_depth: u16,
    time_budget: Duration,
    safety_margin: Duration,
    white_value_params: Vec<f32>,
    black_value_params: Vec<f32>,
    use_transposition_table: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            max_depth: 4,
            time_budget: Duration::from_secs(55),
            safety_margin: Duration::from_secs(5),
            white_value_params: WHITE_VALUE_PARAMS.to_vec(),
            black_value_params: BLACK_VALUE_PARAMS.to_vec(),
            use_transposition_table: true,
        }
    }
}

impl SearchSettings {
    /// Deepest iteration of the iterative deepening loop
    pub fn max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Total time allowed for one move, including the safety margin
    pub fn time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Time reserved at the end of the budget, for returning the move
    pub fn safety_margin(mut self, safety_margin: Duration) -> Self {
        self.safety_margin = safety_margin;
        self
    }

    pub fn add_white_value_params(mut self, params: Vec<f32>) -> Self {
        self.white_value_params = params;
        self
    }

    pub fn add_black_value_params(mut self, params: Vec<f32>) -> Self {
        self.black_value_params = params;
        self
    }

    pub fn use_transposition_table(&self) -> bool {
        self.use_transposition_table
    }

    pub fn transposition_table(mut self, enabled: bool) -> Self {
        self.use_transposition_table = enabled;
        self
    }

    pub fn get_max_depth(&self) -> u16 {
        self.max_depth
    }

    pub fn get_time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn value_params(&self, side: Color) -> &[f32] {
        match side {
            Color::White => &self.white_value_params,
            Color::Black => &self.black_value_params,
        }
    }

    /// The point in time a search started at `start` must finish by
    pub fn deadline(&self, start: Instant) -> Instant {
        start + self.time_budget.saturating_sub(self.safety_margin)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TablutError::InvalidConfiguration(
                "Search depth must be at least 1".to_string(),
            ));
        }
        for side in [Color::White, Color::Black] {
            let expected = parameters::num_features(side);
            let actual = self.value_params(side).len();
            if actual != expected {
                return Err(TablutError::InvalidConfiguration(format!(
                    "Expected {} {:?} value parameters, got {}",
                    expected, side, actual
                )));
            }
        }
        Ok(())
    }
}

/// The move chosen by a search, with some statistics
#[derive(Clone, PartialEq, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: Score,
    /// Deepest fully completed iteration, 0 if none completed
    pub depth: u16,
    pub nodes: u64,
}

/// Choose a move for the side to move, returning before `deadline`.
///
/// Searches with iterative deepening up to the configured depth. If the deadline passes,
/// the best move found so far is returned instead.
pub fn select_move(
    position: &Position,
    deadline: Instant,
    settings: &SearchSettings,
) -> Result<SearchResult> {
    settings.validate()?;
    if position.is_terminal() {
        return Err(TablutError::GameOver(position.outcome()));
    }
    let root_player = position.side_to_move();
    let mut searcher = Searcher::new(root_player, settings, Some(deadline));

    let mut scored_moves: Vec<(Move, Score)> = Vec::new();
    for mv in position.legal_moves() {
        let child = position.result(mv);
        if child.winner() == Some(root_player) {
            info!("Found immediate win {} ({})", mv, child.outcome());
            return Ok(SearchResult {
                best_move: mv,
                score: WIN_SCORE - 1.0,
                depth: 1,
                nodes: scored_moves.len() as u64 + 1,
            });
        }
        scored_moves.push((mv, searcher.one_ply_score(&child)));
    }
    scored_moves.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    let mut moves: Vec<Move> = scored_moves.iter().map(|(mv, _)| *mv).collect();

    let (fallback_move, fallback_score) = *scored_moves
        .first()
        .ok_or(TablutError::GameOver(position.outcome()))?;
    let mut result = SearchResult {
        best_move: fallback_move,
        score: fallback_score,
        depth: 0,
        nodes: moves.len() as u64,
    };

    for depth in 1..=settings.max_depth {
        let mut partial_best: Option<(Move, Score)> = None;
        let iteration = searcher.search_root(position, depth, &moves, |mv, score| {
            if partial_best.is_none_or(|(_, best_score)| score > best_score) {
                partial_best = Some((mv, score));
            }
        });
        match iteration {
            Ok((Some(best_move), score)) => {
                result.best_move = best_move;
                result.score = score;
                result.depth = depth;
                result.nodes = searcher.nodes;
                debug!(
                    "Depth {}: {} scores {:.3}, {} nodes, {} tt entries, {} tt hits",
                    depth,
                    best_move,
                    score,
                    searcher.nodes,
                    searcher.tt_entries(),
                    searcher.tt_hits()
                );
                if let Some(index) = moves.iter().position(|mv| *mv == best_move) {
                    moves[..=index].rotate_right(1);
                }
                if score.abs() > WIN_THRESHOLD {
                    break;
                }
            }
            Ok((None, _)) => break,
            Err(SearchTimeout) => {
                // The previous best move is always searched first
                if let Some((mv, score)) = partial_best {
                    result.best_move = mv;
                    result.score = score;
                }
                result.nodes = searcher.nodes;
                warn!(
                    "Deadline reached during depth {} search, playing {}",
                    depth, result.best_move
                );
                break;
            }
        }
    }

    info!(
        "{:?} plays {} with score {:.3} at depth {}",
        root_player, result.best_move, result.score, result.depth
    );
    Ok(result)
}

/// Search `position` to a fixed depth, without a deadline.
/// Returns the best move, or `None` if the game is over, and its score for the side to move.
pub fn alpha_beta(position: &Position, depth: u16, settings: &SearchSettings) -> (Option<Move>, Score) {
    let mut searcher = Searcher::new(position.side_to_move(), settings, None);
    if position.is_terminal() {
        return (None, searcher.terminal_score(position, 0));
    }
    if depth == 0 {
        return (None, searcher.heuristic(position));
    }
    let moves = position.legal_moves();
    match searcher.search_root(position, depth, &moves, |_, _| ()) {
        Ok(result) => result,
        Err(SearchTimeout) => unreachable!("Search without a deadline cannot time out"),
    }
}

/// The move with the best heuristic value one ply ahead
pub fn best_one_ply_move(position: &Position, settings: &SearchSettings) -> Result<SearchResult> {
    if position.is_terminal() {
        return Err(TablutError::GameOver(position.outcome()));
    }
    let searcher = Searcher::new(position.side_to_move(), settings, None);
    let moves = position.legal_moves();
    let nodes = moves.len() as u64;
    moves
        .into_iter()
        .map(|mv| (mv, searcher.one_ply_score(&position.result(mv))))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(best_move, score)| SearchResult {
            best_move,
            score,
            depth: 1,
            nodes,
        })
        .ok_or(TablutError::GameOver(position.outcome()))
}

/// Search on a worker thread for at most the settings' time budget.
///
/// If the worker has not answered when the budget runs out, the best one-ply move is played.
pub fn play_move_time(position: &Position, settings: &SearchSettings) -> Result<SearchResult> {
    settings.validate()?;
    if position.is_terminal() {
        return Err(TablutError::GameOver(position.outcome()));
    }
    let start_time = Instant::now();
    let deadline = settings.deadline(start_time);

    let (sender, receiver) = crossbeam_channel::bounded(1);
    let worker_position = position.clone();
    let worker_settings = settings.clone();
    thread::spawn(move || {
        let result = select_move(&worker_position, deadline, &worker_settings);
        // The receiver is gone if the caller already gave up on us
        let _ = sender.send(result);
    });

    match receiver.recv_timeout(settings.time_budget) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                "No move from search worker after {:.1}s ({}), using one-ply fallback",
                start_time.elapsed().as_secs_f32(),
                err
            );
            best_one_ply_move(position, settings)
        }
    }
}

/// A uniformly random legal move
pub fn random_move<R: Rng>(position: &Position, rng: &mut R) -> Result<Move> {
    position
        .legal_moves()
        .choose(rng)
        .copied()
        .ok_or(TablutError::GameOver(position.outcome()))
}
