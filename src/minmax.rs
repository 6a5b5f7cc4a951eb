//! A very simple implementation of the minmax search algorithm.
//! This is not used by the engine, it is here to check the alpha-beta search against.

use board_game_traits::Color;

use crate::position::Game;
use crate::search::{Score, WIN_SCORE};

/// Unpruned minmax search, calculating up to `depth` plies deep.
///
/// Returns the best move and its score for the side to move. Finished games score
/// `WIN_SCORE - ply` for the winner, and positions at the cutoff depth use `eval`,
/// which is called with the side to move at the root.
pub fn minmax<G: Game>(
    game: &G,
    depth: u16,
    eval: &impl Fn(&G, Color) -> Score,
) -> (Option<G::Move>, Score) {
    minmax_rec(game, game.side_to_move(), depth, 0, eval)
}

fn minmax_rec<G: Game>(
    game: &G,
    root_player: Color,
    depth: u16,
    ply: u16,
    eval: &impl Fn(&G, Color) -> Score,
) -> (Option<G::Move>, Score) {
    if game.is_terminal() {
        let utility = game.utility(root_player);
        let score = if utility > 0.0 {
            WIN_SCORE - ply as Score
        } else if utility < 0.0 {
            -(WIN_SCORE - ply as Score)
        } else {
            0.0
        };
        return (None, score);
    }
    if depth == 0 {
        return (None, eval(game, root_player));
    }
    let child_evaluations = game.actions().into_iter().map(|mv| {
        let (_, score) = minmax_rec(&game.result(&mv), root_player, depth - 1, ply + 1, eval);
        (Some(mv), score)
    });
    let best = if game.side_to_move() == root_player {
        child_evaluations.max_by(|(_, a), (_, b)| a.total_cmp(b))
    } else {
        child_evaluations.min_by(|(_, a), (_, b)| a.total_cmp(b))
    };
    best.unwrap_or_else(|| (None, eval(game, root_player)))
}
