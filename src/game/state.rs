use std::time::{Duration, Instant};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::constants::{MOVE_DELAY, SOFT_DROP_DELAY};
use crate::game::board::{self, Board, empty_board};
use crate::game::piece::{rotate, ActivePiece, Piece};
use crate::game::scoring;
use crate::input::{InputDirection, InputState};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Falling,
    Paused,
    GameOver,
}

/// Things the simulation reports to the outside world, drained once per frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    LinesCleared(u32),
    GameOver,
}

pub struct Game {
    pub config: GameConfig,
    pub board: Board,
    pub current_piece: ActivePiece,
    pub score: u32,
    pub lines_cleared: u32,
    pub fall_interval: Duration,
    pub game_state: GameState,
    pub fall_timer: Instant,
    pub move_timer: Option<Instant>,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let current_piece = ActivePiece::spawn(Piece::random(&mut rng));
        Self {
            fall_interval: scoring::fall_interval(0, config.base_fall_interval),
            config,
            board: empty_board(),
            current_piece,
            score: 0,
            lines_cleared: 0,
            game_state: GameState::Falling,
            fall_timer: Instant::now(),
            move_timer: None,
            events: Vec::new(),
            rng,
        }
    }

    /// A fresh session with the same configuration.
    pub fn reset(&self) -> Self {
        Self::new(self.config.clone())
    }

    pub fn can_restart(&self) -> bool {
        matches!(self.game_state, GameState::Paused | GameState::GameOver)
    }

    pub fn is_paused(&self) -> bool {
        self.game_state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_state == GameState::GameOver
    }

    pub fn level(&self) -> u32 {
        scoring::level(self.score)
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.game_state {
            GameState::Falling => {
                self.game_state = GameState::Paused;
                log::debug!("paused at score {}", self.score);
            }
            GameState::Paused => {
                self.game_state = GameState::Falling;
                // Resuming must not drop the piece right away
                self.fall_timer = now;
                log::debug!("resumed");
            }
            GameState::GameOver => {}
        }
    }

    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_state != GameState::Falling {
            return false;
        }

        let piece = &self.current_piece;
        if board::collides(&piece.piece.shape, piece.x + dx, piece.y + dy, &self.board) {
            return false;
        }

        self.current_piece.x += dx;
        self.current_piece.y += dy;
        true
    }

    /// Rotates clockwise in place; a rotation that would collide is dropped.
    pub fn rotate_piece(&mut self) -> bool {
        if self.game_state != GameState::Falling {
            return false;
        }

        let piece = &self.current_piece;
        let rotated = rotate(&piece.piece.shape);
        if board::collides(&rotated, piece.x, piece.y, &self.board) {
            return false;
        }

        self.current_piece.piece.shape = rotated;
        true
    }

    /// Moves the piece down one row, locking it when it cannot move.
    fn step_down(&mut self) {
        if !self.move_piece(0, 1) {
            self.lock_piece();
        }
    }

    pub fn lock_piece(&mut self) -> u32 {
        if self.game_state != GameState::Falling {
            return 0;
        }

        let (board, rows) = board::lock(&self.current_piece, self.board);
        self.board = board;
        self.lines_cleared += rows;
        self.score += scoring::score_delta(rows);
        self.fall_interval = scoring::fall_interval(self.score, self.config.base_fall_interval);
        if rows > 0 {
            log::debug!("cleared {} rows, score {}", rows, self.score);
            self.events.push(GameEvent::LinesCleared(rows));
        }

        self.spawn_piece();
        rows
    }

    fn spawn_piece(&mut self) {
        self.current_piece = ActivePiece::spawn(Piece::random(&mut self.rng));

        let piece = &self.current_piece;
        if board::collides(&piece.piece.shape, piece.x, piece.y, &self.board) {
            self.game_state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("game over with score {} after {} lines", self.score, self.lines_cleared);
        }
    }

    fn move_ready(&self, now: Instant, delay: u64) -> bool {
        self.move_timer
            .map_or(true, |last| now.duration_since(last) > Duration::from_millis(delay))
    }

    pub fn update(&mut self, input: &InputState, now: Instant) {
        if self.game_state != GameState::Falling {
            return;
        }

        if input.is_pressed(InputDirection::Left) && self.move_ready(now, MOVE_DELAY) && self.move_piece(-1, 0) {
            self.move_timer = Some(now);
        }
        if input.is_pressed(InputDirection::Right) && self.move_ready(now, MOVE_DELAY) && self.move_piece(1, 0) {
            self.move_timer = Some(now);
        }

        if input.is_pressed(InputDirection::Down) && self.move_ready(now, SOFT_DROP_DELAY) {
            self.step_down();
            self.move_timer = Some(now);
        }

        if self.game_state != GameState::Falling {
            return;
        }

        if now.duration_since(self.fall_timer) > self.fall_interval {
            self.step_down();
            self.fall_timer = now;
        }
    }
}
