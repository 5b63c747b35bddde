use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rodio::source::{Buffered, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::config::AudioConfig;
use crate::game::GameEvent;

const MUSIC_FILE: &str = "music.mp3";
const LINE_CLEAR_FILE: &str = "point.mp3";
const GAME_OVER_FILE: &str = "lose.mp3";

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Background music and sound effects. Every part that fails to load is
/// logged and left silent; the game never depends on it.
pub struct Audio {
    output: Option<Output>,
}

struct Output {
    // Dropping the stream stops all playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music_path: std::path::PathBuf,
    music_volume: f32,
    music: Option<Sink>,
    line_clear: Option<Sound>,
    game_over: Option<Sound>,
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Decoder::new(BufReader::new(file)).with_context(|| format!("decoding {}", path.display()))
}

pub fn load_sound(path: &Path) -> Result<Sound> {
    Ok(open_decoder(path)?.buffered())
}

fn load_or_warn(path: &Path) -> Option<Sound> {
    match load_sound(path) {
        Ok(sound) => Some(sound),
        Err(err) => {
            log::warn!("sound effect disabled: {:#}", err);
            None
        }
    }
}

impl Audio {
    pub fn disabled() -> Self {
        Self { output: None }
    }

    pub fn open(config: &AudioConfig) -> Self {
        if !config.enabled {
            log::info!("audio muted");
            return Self::disabled();
        }

        let (stream, handle) = match OutputStream::try_default().context("opening audio output") {
            Ok(output) => output,
            Err(err) => {
                log::warn!("audio disabled: {:#}", err);
                return Self::disabled();
            }
        };

        let dir = &config.asset_dir;
        Self {
            output: Some(Output {
                _stream: stream,
                handle,
                music_path: dir.join(MUSIC_FILE),
                music_volume: config.music_volume,
                music: None,
                line_clear: load_or_warn(&dir.join(LINE_CLEAR_FILE)),
                game_over: load_or_warn(&dir.join(GAME_OVER_FILE)),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Starts the looping background track from the beginning.
    pub fn start_music(&mut self) {
        let Some(output) = self.output.as_mut() else {
            return;
        };

        // Replacing the sink stops the previous track
        output.music = None;
        match output.music_sink() {
            Ok(sink) => output.music = Some(sink),
            Err(err) => log::warn!("music disabled: {:#}", err),
        }
    }

    pub fn set_paused(&self, paused: bool) {
        if let Some(sink) = self.output.as_ref().and_then(|o| o.music.as_ref()) {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    pub fn handle_event(&self, event: GameEvent) {
        let Some(output) = self.output.as_ref() else {
            return;
        };

        let sound = match event {
            GameEvent::LinesCleared(_) => &output.line_clear,
            GameEvent::GameOver => &output.game_over,
        };
        if let Some(sound) = sound {
            if let Err(err) = output.handle.play_raw(sound.clone().convert_samples()) {
                log::warn!("failed to play sound for {:?}: {}", event, err);
            }
        }
    }
}

impl Output {
    fn music_sink(&self) -> Result<Sink> {
        let source = open_decoder(&self.music_path)?.repeat_infinite();
        let sink = Sink::try_new(&self.handle).context("creating music sink")?;
        sink.set_volume(self.music_volume);
        sink.append(source);
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn muted_config_never_opens_a_device() {
        let config = AudioConfig {
            enabled: false,
            asset_dir: PathBuf::from("assets/sounds"),
            music_volume: 0.5,
        };
        let mut audio = Audio::open(&config);
        assert!(!audio.is_enabled());

        audio.start_music();
        audio.set_paused(true);
        audio.handle_event(GameEvent::LinesCleared(2));
        audio.handle_event(GameEvent::GameOver);
    }

    #[test]
    fn missing_asset_reports_the_path() {
        let err = load_sound(Path::new("/nonexistent/blockfall/point.mp3")).err().unwrap();
        assert!(format!("{:#}", err).contains("/nonexistent/blockfall/point.mp3"));
    }

    #[test]
    fn missing_asset_degrades_to_silence() {
        assert!(load_or_warn(Path::new("/nonexistent/blockfall/lose.mp3")).is_none());
    }
}
