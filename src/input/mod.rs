pub mod direction;
pub mod handler;

pub use direction::InputDirection;
pub use handler::{handle_input, Command, InputState};
