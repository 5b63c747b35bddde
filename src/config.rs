use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{BASE_FALL_INTERVAL, DEFAULT_MUSIC_VOLUME};

/// Falling-block puzzle game for the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle game in the terminal. Clear full rows to score; the pieces speed up every 1000 points.",
    long_about = "Falling-block puzzle game in the terminal.\n\n\
        CONTROLS:\n  Left/Right  Move        Down   Soft drop\n  Space/Up    Rotate      P      Pause\n  \
        Enter       Restart (paused or game over)\n  Esc / Q     Quit"
)]
pub struct Args {
    /// Directory holding music.mp3, point.mp3 and lose.mp3.
    #[arg(long, default_value = "assets/sounds", value_name = "DIR")]
    pub assets: PathBuf,

    /// Run without any audio.
    #[arg(long)]
    pub mute: bool,

    /// Background music volume.
    #[arg(long, default_value_t = DEFAULT_MUSIC_VOLUME, value_name = "VOLUME", value_parser = parse_volume)]
    pub music_volume: f32,

    /// Starting fall interval in milliseconds; anything below the 120 ms floor plays at 120.
    #[arg(long, default_value_t = BASE_FALL_INTERVAL, value_name = "MS")]
    pub base_interval_ms: u64,

    /// Where log output goes; the terminal itself is taken by the game.
    #[arg(long, default_value = "blockfall.log", value_name = "FILE")]
    pub log_file: PathBuf,
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(format!("volume must be between 0.0 and 1.0, got {}", volume))
    }
}

/// Options that affect the simulation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub base_fall_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_fall_interval: Duration::from_millis(BASE_FALL_INTERVAL),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    pub enabled: bool,
    pub asset_dir: PathBuf,
    pub music_volume: f32,
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            base_fall_interval: Duration::from_millis(self.base_interval_ms),
        }
    }

    pub fn audio_config(&self) -> AudioConfig {
        AudioConfig {
            enabled: !self.mute,
            asset_dir: self.assets.clone(),
            music_volume: self.music_volume,
        }
    }
}
