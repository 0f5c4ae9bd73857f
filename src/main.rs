use clap::Parser;
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use space_defender::{App, Config};

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    init_logging(&config.log_file)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(
        supports_keyboard_enhancement,
        difficulty = config.difficulty.get_name(),
        "starting space defender"
    );

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let result = run(&config, supports_keyboard_enhancement);

    // Restore runs even if setup or the game loop failed; the loop's error wins
    let restored = restore_terminal(supports_keyboard_enhancement);
    result.and(restored)
}

fn run(config: &Config, supports_keyboard_enhancement: bool) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen so key
    // releases are reported
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    App::new(config, supports_keyboard_enhancement).run(&mut terminal)
}

/// Every step is attempted; the first failure is reported.
fn restore_terminal(keyboard_enhancement: bool) -> Result<()> {
    let mut stdout = stdout();
    let mut first_error = None;

    if keyboard_enhancement {
        keep_first_error(&mut first_error, execute!(stdout, PopKeyboardEnhancementFlags));
    }
    keep_first_error(&mut first_error, disable_raw_mode());
    keep_first_error(&mut first_error, execute!(stdout, LeaveAlternateScreen, Show));

    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn keep_first_error(first_error: &mut Option<io::Error>, step: io::Result<()>) {
    if let Err(err) = step {
        if first_error.is_none() {
            warn!(%err, "terminal restore step failed");
        }
        first_error.get_or_insert(err);
    }
}

/// Sends tracing output to a file; the terminal is busy drawing the game.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
