use board_game_traits::Color;

pub const NUM_WHITE_FEATURES: usize = 9;
pub const NUM_BLACK_FEATURES: usize = 5;

// Indexes into the white feature vector
pub const W_BLACK_PAWNS: usize = 0;
pub const W_WHITE_PAWNS: usize = W_BLACK_PAWNS + 1;
pub const W_KING_THRONE_DISTANCE: usize = W_WHITE_PAWNS + 1;
pub const W_BLACK_SIGHTLINES: usize = W_KING_THRONE_DISTANCE + 1;
pub const W_KING_BLACK_NEIGHBOURS: usize = W_BLACK_SIGHTLINES + 1;
pub const W_KING_PSQT: usize = W_KING_BLACK_NEIGHBOURS + 1;
pub const W_THREATENED_WHITE_PAWNS: usize = W_KING_PSQT + 1;
pub const W_KING_ESCAPE_MOVES: usize = W_THREATENED_WHITE_PAWNS + 1;
pub const W_BLACK_IN_KING_QUADRANT: usize = W_KING_ESCAPE_MOVES + 1;

// Indexes into the black feature vector
pub const B_BLACK_PAWNS: usize = 0;
pub const B_WHITE_PAWNS: usize = B_BLACK_PAWNS + 1;
pub const B_BLACK_AROUND_KING: usize = B_WHITE_PAWNS + 1;
pub const B_BLACK_SIGHTLINES: usize = B_BLACK_AROUND_KING + 1;
pub const B_KING_ESCAPE_MOVES: usize = B_BLACK_SIGHTLINES + 1;

const _: () = assert!(W_BLACK_IN_KING_QUADRANT + 1 == NUM_WHITE_FEATURES);
const _: () = assert!(B_KING_ESCAPE_MOVES + 1 == NUM_BLACK_FEATURES);

#[rustfmt::skip]
pub const WHITE_VALUE_PARAMS: [f32; NUM_WHITE_FEATURES] = [
    -1.0,   // black pawns
    1.5,    // white pawns
    0.5,    // king distance from the throne
    -0.8,   // black pawns with a clear view of the king
    -1.2,   // black pawns next to the king
    1.0,    // king square table
    -0.6,   // white pawns black can capture next move
    8.0,    // escapes the king can reach in one move
    -0.2,   // black pawns in the king's quadrant
];

#[rustfmt::skip]
pub const BLACK_VALUE_PARAMS: [f32; NUM_BLACK_FEATURES] = [
    0.958245,   // black pawns
    -0.256884,  // white pawns
    0.812052,   // black pawns around the king
    0.919335,   // black pawns with a clear view of the king
    -1.787031,  // escapes the king can reach in one move
];

/// Default weights for the side the evaluation is done for
pub fn value_params(side: Color) -> &'static [f32] {
    match side {
        Color::White => &WHITE_VALUE_PARAMS,
        Color::Black => &BLACK_VALUE_PARAMS,
    }
}

pub fn num_features(side: Color) -> usize {
    match side {
        Color::White => NUM_WHITE_FEATURES,
        Color::Black => NUM_BLACK_FEATURES,
    }
}

/// Value of the king standing on each square. High along the lanes leading to escape squares.
#[rustfmt::skip]
pub const KING_PSQT: [f32; 81] = [
    0.0, 0.9, 0.9, 0.0, 0.0, 0.0, 0.9, 0.9, 0.0,
    0.9, 0.6, 0.7, 0.3, 0.0, 0.3, 0.7, 0.6, 0.9,
    0.9, 0.7, 0.8, 0.5, 0.3, 0.5, 0.8, 0.7, 0.9,
    0.0, 0.3, 0.5, 0.2, 0.1, 0.2, 0.5, 0.3, 0.0,
    0.0, 0.0, 0.3, 0.1, 0.0, 0.1, 0.3, 0.0, 0.0,
    0.0, 0.3, 0.5, 0.2, 0.1, 0.2, 0.5, 0.3, 0.0,
    0.9, 0.7, 0.8, 0.5, 0.3, 0.5, 0.8, 0.7, 0.9,
    0.9, 0.6, 0.7, 0.3, 0.0, 0.3, 0.7, 0.6, 0.9,
    0.0, 0.9, 0.9, 0.0, 0.0, 0.0, 0.9, 0.9, 0.0,
];
