use board_game_traits::Color;

use crate::position::{BitBoard, Direction, Move, Position, Square};

impl Position {
    /// Whether a piece standing on `from` may stop on, or pass over, `to`
    #[inline]
    pub(crate) fn is_open_for(&self, from: Square, to: Square) -> bool {
        if self[to].is_some() || to.is_throne() {
            return false;
        }
        match to.camp() {
            Some(camp) => from.camp() == Some(camp),
            None => true,
        }
    }

    /// The squares occupied by pieces that `color` can move, including the king for White
    pub(crate) fn movable_pieces(&self, color: Color) -> BitBoard {
        match (color, self.king_square()) {
            (Color::White, Some(king)) => self.white_pawns.set(king),
            (Color::White, None) => self.white_pawns,
            (Color::Black, _) => self.black_pawns,
        }
    }

    /// Squares reachable in one move by the piece on `from`, in the order `Direction::ALL` is scanned
    pub(crate) fn destinations(&self, from: Square) -> impl Iterator<Item = Square> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| {
            (1..)
                .map_while(move |len| from.jump_direction(direction, len))
                .take_while(move |to| self.is_open_for(from, *to))
        })
    }

    pub(crate) fn generate_moves_for(&self, color: Color, moves: &mut Vec<Move>) {
        for from in self.movable_pieces(color) {
            moves.extend(self.destinations(from).map(|to| Move::new(from, to)));
        }
    }

    /// Legal moves for the side to move, sorted by `(from, to)`. Empty if the game is over.
    pub fn generate_moves(&self, moves: &mut Vec<Move>) {
        if self.is_terminal() {
            return;
        }
        let start = moves.len();
        self.generate_moves_for(self.side_to_move(), moves);
        moves[start..].sort_unstable();
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.generate_moves(&mut moves);
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        if self.is_terminal() || !self.movable_pieces(self.side_to_move()).get(mv.from) {
            return false;
        }
        match mv.from.squares_between(mv.to) {
            Some(mut between) => {
                between.all(|square| self.is_open_for(mv.from, square))
                    && self.is_open_for(mv.from, mv.to)
            }
            None => false,
        }
    }

    /// Whether `color` has at least one legal move, ignoring whether the game is already decided
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.movable_pieces(color).into_iter().any(|from| {
            from.neighbours()
                .any(|(_, neighbour)| self.is_open_for(from, neighbour))
        })
    }

    /// Count the leaf nodes of the legal move tree, `depth` plies deep.
    /// Finished games have no children.
    pub fn perft(&self, depth: u16) -> u64 {
        if depth == 0 {
            1
        } else {
            let mut moves = vec![];
            self.generate_moves(&mut moves);
            if depth == 1 {
                moves.len() as u64
            } else {
                moves
                    .into_iter()
                    .map(|mv| self.result(mv).perft(depth - 1))
                    .sum()
            }
        }
    }
}
