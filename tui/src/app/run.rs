use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ozone_predictor::{ConfigError, PredictorConfig, ServiceState};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::screens::{Action, Screen};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the predictor form until the user quits.
///
/// # Arguments
/// * `services` - The outcome of loading the model, a disabled service shows only its error.
/// * `config` - The configuration the form takes its defaults from.
/// * `config_error` - Why the configuration file was ignored, if it was.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(
    services: &ServiceState,
    config: &PredictorConfig,
    config_error: Option<ConfigError>,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let notice = config_error.map(|e| format!("{e}, using defaults"));
    let mut screen = Screen::start(services, config, notice);

    loop {
        terminal.draw(|f| screen.draw(f))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(k.code, services.service()) {
                    Action::Quit => break,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
