use std::collections::HashMap;
use std::time::{Duration, Instant};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

use crate::input::direction::{InputDirection, DirectionState};
use crate::constants::KEY_TIMEOUT;

/// Discrete actions triggered by a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    Rotate,
    Restart,
}

/// Held state of the directional keys.
pub struct InputState {
    pub directions: HashMap<InputDirection, DirectionState>,
    pub keyboard_enhancement_active: bool,
}

impl InputState {
    pub fn new() -> Self {
        let mut directions = HashMap::new();
        directions.insert(InputDirection::Left, DirectionState::new());
        directions.insert(InputDirection::Right, DirectionState::new());
        directions.insert(InputDirection::Down, DirectionState::new());

        Self {
            directions,
            keyboard_enhancement_active: false,
        }
    }

    pub fn press_direction(&mut self, dir: InputDirection, now: Instant) {
        match dir {
            InputDirection::Left => self.release_direction(InputDirection::Right),
            InputDirection::Right => self.release_direction(InputDirection::Left),
            InputDirection::Down => {}
        }

        if let Some(state) = self.directions.get_mut(&dir) {
            state.press(now);
        }
    }

    pub fn release_direction(&mut self, dir: InputDirection) {
        if let Some(state) = self.directions.get_mut(&dir) {
            state.release();
        }
    }

    pub fn is_pressed(&self, dir: InputDirection) -> bool {
        self.directions.get(&dir).map_or(false, |s| s.pressed)
    }

    /// Without release events from the terminal, a key counts as released
    /// once it stops sending press/repeat events.
    pub fn check_timeouts(&mut self, now: Instant) {
        if !self.keyboard_enhancement_active {
            for state in self.directions.values_mut() {
                if state.pressed && now.duration_since(state.last_update) > Duration::from_millis(KEY_TIMEOUT) {
                    state.release();
                }
            }
        }
    }

    pub fn release_all(&mut self) {
        for state in self.directions.values_mut() {
            state.release();
        }
    }
}

fn direction_for(key_code: KeyCode) -> Option<InputDirection> {
    match key_code {
        KeyCode::Left => Some(InputDirection::Left),
        KeyCode::Right => Some(InputDirection::Right),
        KeyCode::Down => Some(InputDirection::Down),
        _ => None,
    }
}

pub fn handle_input(
    input: &mut InputState,
    key_code: KeyCode,
    kind: KeyEventKind,
    modifiers: KeyModifiers,
    now: Instant,
) -> Option<Command> {
    if let Some(dir) = direction_for(key_code) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => input.press_direction(dir, now),
            KeyEventKind::Release => input.release_direction(dir),
        }
        return None;
    }

    if kind != KeyEventKind::Press {
        return None;
    }

    match key_code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char(' ') | KeyCode::Up => Some(Command::Rotate),
        KeyCode::Enter => Some(Command::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, code: KeyCode, now: Instant) -> Option<Command> {
        handle_input(input, code, KeyEventKind::Press, KeyModifiers::NONE, now)
    }

    #[test]
    fn discrete_keys_map_to_commands() {
        let mut input = InputState::new();
        let now = Instant::now();
        assert_eq!(press(&mut input, KeyCode::Esc, now), Some(Command::Quit));
        assert_eq!(press(&mut input, KeyCode::Char('q'), now), Some(Command::Quit));
        assert_eq!(press(&mut input, KeyCode::Char('p'), now), Some(Command::TogglePause));
        assert_eq!(press(&mut input, KeyCode::Char(' '), now), Some(Command::Rotate));
        assert_eq!(press(&mut input, KeyCode::Up, now), Some(Command::Rotate));
        assert_eq!(press(&mut input, KeyCode::Enter, now), Some(Command::Restart));
        assert_eq!(press(&mut input, KeyCode::Char('x'), now), None);
        assert_eq!(
            handle_input(&mut input, KeyCode::Char('c'), KeyEventKind::Press, KeyModifiers::CONTROL, now),
            Some(Command::Quit)
        );
    }

    #[test]
    fn repeats_and_releases_do_not_retrigger_commands() {
        let mut input = InputState::new();
        let now = Instant::now();
        assert_eq!(handle_input(&mut input, KeyCode::Char(' '), KeyEventKind::Repeat, KeyModifiers::NONE, now), None);
        assert_eq!(handle_input(&mut input, KeyCode::Enter, KeyEventKind::Release, KeyModifiers::NONE, now), None);
    }

    #[test]
    fn opposite_horizontal_keys_cancel() {
        let mut input = InputState::new();
        let now = Instant::now();
        press(&mut input, KeyCode::Left, now);
        press(&mut input, KeyCode::Down, now);
        assert!(input.is_pressed(InputDirection::Left));

        press(&mut input, KeyCode::Right, now);
        assert!(input.is_pressed(InputDirection::Right));
        assert!(!input.is_pressed(InputDirection::Left));
        assert!(input.is_pressed(InputDirection::Down));

        handle_input(&mut input, KeyCode::Right, KeyEventKind::Release, KeyModifiers::NONE, now);
        assert!(!input.is_pressed(InputDirection::Right));
    }

    #[test]
    fn held_keys_time_out_without_enhancement() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        press(&mut input, KeyCode::Left, t0);

        input.check_timeouts(t0 + Duration::from_millis(KEY_TIMEOUT));
        assert!(input.is_pressed(InputDirection::Left));

        handle_input(&mut input, KeyCode::Left, KeyEventKind::Repeat, KeyModifiers::NONE, t0 + Duration::from_millis(80));
        input.check_timeouts(t0 + Duration::from_millis(150));
        assert!(input.is_pressed(InputDirection::Left));

        input.check_timeouts(t0 + Duration::from_millis(200));
        assert!(!input.is_pressed(InputDirection::Left));
    }

    #[test]
    fn enhanced_keyboards_wait_for_release() {
        let mut input = InputState::new();
        input.keyboard_enhancement_active = true;
        let t0 = Instant::now();
        press(&mut input, KeyCode::Down, t0);
        input.check_timeouts(t0 + Duration::from_secs(5));
        assert!(input.is_pressed(InputDirection::Down));
    }
}
