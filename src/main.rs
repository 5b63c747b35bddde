use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::{
    fs::File,
    io::{self, stdout, Stdout},
    path::Path,
    time::{Duration, Instant},
};

mod audio;
mod config;
mod constants;
mod game;
mod input;
mod ui;

use audio::Audio;
use config::Args;
use game::Game;
use input::{handle_input, Command, InputState};
use ui::ui;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn init_logging(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        // No log file, no logging; the game still runs
        Err(_) => return,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file);
    log::info!("starting with {:?}", args);

    let mut audio = Audio::open(&args.audio_config());
    log::info!("audio enabled: {}", audio.is_enabled());

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events only arrive when the terminal speaks the kitty protocol
    let keyboard_enhancement_active = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhancement_active {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    log::debug!("keyboard enhancement active: {}", keyboard_enhancement_active);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &args, &mut audio, keyboard_enhancement_active);

    // Cleanup, even when the loop failed
    let pop = if keyboard_enhancement_active {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = terminal::disable_raw_mode();
    let leave = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();

    if let Err(err) = &result {
        log::error!("exiting on error: {:#}", err);
    }
    result?;
    first_error([pop, raw, leave, cursor])?;
    Ok(())
}

/// Every teardown step has already run; report the earliest failure.
fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

fn run(terminal: &mut Term, args: &Args, audio: &mut Audio, keyboard_enhancement_active: bool) -> Result<()> {
    let mut game = Game::new(args.game_config());
    let mut input_state = InputState::new();
    input_state.keyboard_enhancement_active = keyboard_enhancement_active;

    audio.start_music();

    // Game loop
    loop {
        // Render
        terminal.draw(|f| ui(f, &game))?;

        // Handle input
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event::read()? {
                let now = Instant::now();
                match handle_input(&mut input_state, code, kind, modifiers, now) {
                    Some(Command::Quit) => break,
                    Some(Command::TogglePause) => {
                        game.toggle_pause(now);
                        audio.set_paused(game.is_paused());
                    }
                    Some(Command::Rotate) => {
                        game.rotate_piece();
                    }
                    Some(Command::Restart) if game.can_restart() => {
                        log::info!("restarting after score {}", game.score);
                        game = game.reset();
                        input_state.release_all();
                        audio.start_music();
                    }
                    Some(Command::Restart) | None => {}
                }
            }
        }

        // Update game state
        let now = Instant::now();
        input_state.check_timeouts(now);
        game.update(&input_state, now);

        for event in game.take_events() {
            audio.handle_event(event);
        }
    }

    log::info!("quit with score {}", game.score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_reports_the_first_failing_step() {
        let steps = [
            Ok(()),
            Err(io::Error::new(io::ErrorKind::Other, "raw mode")),
            Err(io::Error::new(io::ErrorKind::Other, "alternate screen")),
            Ok(()),
        ];
        let err = first_error(steps).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");
    }

    #[test]
    fn teardown_succeeds_when_every_step_does() {
        assert!(first_error([Ok(()), Ok(()), Ok(())]).is_ok());
    }
}
