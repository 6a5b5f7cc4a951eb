use std::collections::HashMap;

use crate::position::{Move, LAYOUT_KEY_BYTES};
use crate::search::{Score, WIN_THRESHOLD};

pub(crate) type LayoutKey = [u8; LAYOUT_KEY_BYTES];

/// How a stored score relates to the true value of the position
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Bound {
    Exact,
    /// The true value is at least the stored score
    Lower,
    /// The true value is at most the stored score
    Upper,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Entry {
    pub score: Score,
    pub bound: Bound,
    pub depth: u16,
    pub best_move: Option<Move>,
}

/// Transposition table for a single search. Scores are from the root player's perspective,
/// so a table must never be reused for a search from another root.
pub(crate) struct TT {
    entries: HashMap<LayoutKey, Entry>,
    hits: u64,
}

impl TT {
    pub fn new() -> Self {
        TT {
            entries: HashMap::new(),
            hits: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Look up a score usable at exactly `depth` remaining plies, `ply` plies from the root
    pub fn get(&mut self, key: &LayoutKey, depth: u16, ply: u16) -> Option<(Score, Bound)> {
        let entry = self.entries.get(key)?;
        if entry.depth != depth {
            return None;
        }
        self.hits += 1;
        Some((score_from_tt(entry.score, ply), entry.bound))
    }

    /// The best move stored for a position, from a search of any depth
    pub fn best_move(&self, key: &LayoutKey) -> Option<Move> {
        self.entries.get(key).and_then(|entry| entry.best_move)
    }

    pub fn insert(
        &mut self,
        key: LayoutKey,
        score: Score,
        bound: Bound,
        depth: u16,
        ply: u16,
        best_move: Option<Move>,
    ) {
        let entry = Entry {
            score: score_to_tt(score, ply),
            bound,
            depth,
            best_move,
        };
        self.entries.insert(key, entry);
    }
}

// Win scores depend on the distance to the root. Store them relative to the node instead.
fn score_to_tt(score: Score, ply: u16) -> Score {
    if score > WIN_THRESHOLD {
        score + ply as Score
    } else if score < -WIN_THRESHOLD {
        score - ply as Score
    } else {
        score
    }
}

fn score_from_tt(score: Score, ply: u16) -> Score {
    if score > WIN_THRESHOLD {
        score - ply as Score
    } else if score < -WIN_THRESHOLD {
        score + ply as Score
    } else {
        score
    }
}

#[cfg(test)]
use crate::position::Square;
#[cfg(test)]
use crate::search::WIN_SCORE;

#[test]
fn only_same_depth_is_returned_test() {
    let mut tt = TT::new();
    let key = [1; LAYOUT_KEY_BYTES];
    tt.insert(key, 2.5, Bound::Exact, 3, 0, None);
    assert_eq!(tt.get(&key, 3, 0), Some((2.5, Bound::Exact)));
    assert_eq!(tt.get(&key, 2, 0), None);
    assert_eq!(tt.get(&key, 4, 0), None);
    assert_eq!(tt.get(&[2; LAYOUT_KEY_BYTES], 3, 0), None);
    assert_eq!(tt.hits(), 1);
}

#[test]
fn win_scores_are_ply_relative_test() {
    let mut tt = TT::new();
    let key = [7; LAYOUT_KEY_BYTES];
    // Win found 5 plies from the root, stored at ply 2
    tt.insert(key, WIN_SCORE - 5.0, Bound::Lower, 2, 2, None);
    // Reached again at ply 4, the same win is now 7 plies away
    assert_eq!(tt.get(&key, 2, 4), Some((WIN_SCORE - 7.0, Bound::Lower)));

    tt.insert(key, -(WIN_SCORE - 3.0), Bound::Upper, 1, 1, None);
    assert_eq!(tt.get(&key, 1, 1), Some((-(WIN_SCORE - 3.0), Bound::Upper)));
    assert_eq!(tt.get(&key, 1, 3), Some((-(WIN_SCORE - 5.0), Bound::Upper)));
}

#[test]
fn best_move_ignores_depth_test() {
    let mut tt = TT::new();
    let key = [3; LAYOUT_KEY_BYTES];
    let mv = Move::new(Square::new(2, 4), Square::new(2, 1));
    tt.insert(key, 0.0, Bound::Upper, 6, 0, Some(mv));
    assert_eq!(tt.best_move(&key), Some(mv));
    assert_eq!(tt.get(&key, 1, 0), None);
    assert_eq!(tt.len(), 1);
}
