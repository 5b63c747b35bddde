use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDirection {
    Left,
    Right,
    Down,
}

#[derive(Debug)]
pub struct DirectionState {
    pub pressed: bool,
    pub last_update: Instant,
}

impl DirectionState {
    pub fn new() -> Self {
        Self {
            pressed: false,
            last_update: Instant::now(),
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.pressed = true;
        self.last_update = now;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}
