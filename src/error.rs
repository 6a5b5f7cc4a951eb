use thiserror::Error;

use crate::position::{Move, Outcome};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TablutError {
    #[error("Illegal move {0}")]
    IllegalMove(Move),
    #[error("{0}")]
    MalformedMoveNotation(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot search a finished game: {0}")]
    GameOver(Outcome),
}

pub type Result<T, E = TablutError> = std::result::Result<T, E>;
