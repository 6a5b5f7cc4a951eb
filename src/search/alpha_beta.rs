//! Depth-limited alpha-beta search with a transposition table.
//!
//! All scores are from the root player's perspective. Nodes where the root player is
//! to move are max nodes, the others are min nodes.

use std::time::Instant;

use board_game_traits::Color;

use crate::evaluation;
use crate::position::{Move, Position};
use crate::search::tt::{Bound, TT};
use crate::search::{Score, SearchSettings, WIN_SCORE};

/// Raised when the deadline passes during a search. Only used to unwind the recursion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct SearchTimeout;

pub(crate) struct Searcher<'a> {
    root_player: Color,
    settings: &'a SearchSettings,
    deadline: Option<Instant>,
    tt: TT,
    pub nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(root_player: Color, settings: &'a SearchSettings, deadline: Option<Instant>) -> Self {
        Searcher {
            root_player,
            settings,
            deadline,
            tt: TT::new(),
            nodes: 0,
        }
    }

    pub fn tt_entries(&self) -> usize {
        self.tt.len()
    }

    pub fn tt_hits(&self) -> u64 {
        self.tt.hits()
    }

    /// Heuristic value of a non-terminal position for the root player
    pub fn heuristic(&self, position: &Position) -> Score {
        evaluation::evaluate_with_params(
            position,
            self.root_player,
            self.settings.value_params(self.root_player),
        )
    }

    /// Value of a finished game, preferring quick wins and slow losses
    pub fn terminal_score(&self, position: &Position, ply: u16) -> Score {
        match position.winner() {
            Some(winner) if winner == self.root_player => WIN_SCORE - ply as Score,
            Some(_) => -(WIN_SCORE - ply as Score),
            None => 0.0,
        }
    }

    /// Score of a child of the root, looking no further than the move itself
    pub fn one_ply_score(&self, child: &Position) -> Score {
        if child.is_terminal() {
            self.terminal_score(child, 1)
        } else {
            self.heuristic(child)
        }
    }

    fn check_deadline(&self) -> Result<(), SearchTimeout> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SearchTimeout),
            _ => Ok(()),
        }
    }

    /// Search all root moves to `depth` in the given order.
    ///
    /// Returns the best move and its score. Moves that were fully searched before a timeout
    /// are reported through `on_completed`, so the caller can salvage a partial iteration.
    pub fn search_root(
        &mut self,
        position: &Position,
        depth: u16,
        moves: &[Move],
        mut on_completed: impl FnMut(Move, Score),
    ) -> Result<(Option<Move>, Score), SearchTimeout> {
        debug_assert!(depth > 0);
        let mut alpha = Score::NEG_INFINITY;
        let beta = Score::INFINITY;
        let mut best: Option<(Move, Score)> = None;

        for mv in moves {
            self.check_deadline()?;
            let child = position.result(*mv);
            let score = self.search(&child, alpha, beta, depth - 1, 1)?;
            on_completed(*mv, score);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*mv, score));
            }
            alpha = alpha.max(score);
        }

        if self.settings.use_transposition_table() {
            if let Some((mv, score)) = best {
                self.tt.insert(position.layout_key(), score, Bound::Exact, depth, 0, Some(mv));
            }
        }
        Ok(match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, self.terminal_score(position, 0)),
        })
    }

    fn search(
        &mut self,
        position: &Position,
        mut alpha: Score,
        mut beta: Score,
        depth: u16,
        ply: u16,
    ) -> Result<Score, SearchTimeout> {
        self.nodes += 1;
        self.check_deadline()?;

        if position.is_terminal() {
            return Ok(self.terminal_score(position, ply));
        }
        if depth == 0 {
            return Ok(self.heuristic(position));
        }

        let use_tt = self.settings.use_transposition_table();
        let key = position.layout_key();
        let mut tt_move = None;
        if use_tt {
            if let Some((score, bound)) = self.tt.get(&key, depth, ply) {
                match bound {
                    Bound::Exact => return Ok(score),
                    Bound::Lower if score >= beta => return Ok(score),
                    Bound::Upper if score <= alpha => return Ok(score),
                    _ => (),
                }
            }
            tt_move = self.tt.best_move(&key);
        }

        let mut moves = position.legal_moves();
        if let Some(tt_move) = tt_move {
            if let Some(index) = moves.iter().position(|mv| *mv == tt_move) {
                moves[..=index].rotate_right(1);
            }
        }

        let (original_alpha, original_beta) = (alpha, beta);
        let maximizing = position.side_to_move() == self.root_player;
        let mut best_score = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let child = position.result(mv);
            let score = self.search(&child, alpha, beta, depth - 1, ply + 1)?;
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if best_score >= beta {
                    break;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if best_score <= alpha {
                    break;
                }
                beta = beta.min(best_score);
            }
        }

        if use_tt {
            let bound = if best_score <= original_alpha {
                Bound::Upper
            } else if best_score >= original_beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.insert(key, best_score, bound, depth, ply, best_move);
        }
        Ok(best_score)
    }
}
