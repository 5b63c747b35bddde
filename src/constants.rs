pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Spawn offset of a new piece's bounding box
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
pub const SPAWN_Y: i32 = 0;

// Input repeat settings (in milliseconds)
pub const MOVE_DELAY: u64 = 150; // Left/right repeat interval
pub const SOFT_DROP_DELAY: u64 = 50; // Down repeat interval, shares the move timer
pub const KEY_TIMEOUT: u64 = 100; // Timeout for key release detection fallback

// Fall speed (in milliseconds)
pub const BASE_FALL_INTERVAL: u64 = 500;
pub const FALL_STEP_PER_LEVEL: u64 = 40;
pub const MIN_FALL_INTERVAL: u64 = 120;
pub const POINTS_PER_LEVEL: u32 = 1000;

pub const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
