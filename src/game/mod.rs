pub mod piece;
pub mod board;
pub mod scoring;
pub mod state;

pub use board::Cell;
pub use state::{Game, GameEvent, GameState};
