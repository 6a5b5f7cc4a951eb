//! A Tablut engine: game rules, static evaluation and alpha-beta search.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tablut::position::Position;
//! use tablut::search::{self, SearchSettings};
//!
//! let position = Position::start_position();
//! let settings = SearchSettings::default().max_depth(2);
//! let deadline = Instant::now() + Duration::from_secs(10);
//! let result = search::select_move(&position, deadline, &settings).unwrap();
//! assert!(position.is_legal(result.best_move));
//! ```

pub mod error;
pub mod evaluation;
pub mod minmax;
pub mod position;
pub mod search;
mod tests;

pub use error::TablutError;
