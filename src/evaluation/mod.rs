//! Static evaluation of Tablut positions.
//!
//! Each side has its own feature vector. A position's value for a side is the dot product
//! of that side's features with its parameter vector, where higher is better for that side.

use board_game_traits::Color;

use crate::position::Position;

pub mod parameters;
pub mod value_eval;

/// Heuristic value of `position` for `side`, using the default parameters
pub fn evaluate(position: &Position, side: Color) -> f32 {
    evaluate_with_params(position, side, parameters::value_params(side))
}

/// Heuristic value of `position` for `side`.
/// `params` must have one weight per feature of `side`.
pub fn evaluate_with_params(position: &Position, side: Color, params: &[f32]) -> f32 {
    debug_assert_eq!(params.len(), parameters::num_features(side));
    let coefficients = features(position, side);
    coefficients.iter().zip(params).map(|(a, b)| a * b).sum()
}

/// The raw feature vector for `side`, before weighting
pub fn features(position: &Position, side: Color) -> Vec<f32> {
    let mut coefficients = vec![0.0; parameters::num_features(side)];
    match side {
        Color::White => value_eval::white_features(position, &mut coefficients),
        Color::Black => value_eval::black_features(position, &mut coefficients),
    }
    coefficients
}
