use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioPlayer;
use crate::player::Controller;
use crate::{playlist, widget};

mod cli;
mod event_loop;
mod logging;
mod settings;

#[cfg(test)]
mod tests;

use cli::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (settings, settings_warning) = settings::load_settings();

    let log_path = logging::resolve_log_path(cli.log_file.as_deref(), &settings.log);
    logging::init(log_path.as_deref(), &settings.log)?;
    if let Some(warning) = settings_warning {
        tracing::warn!("{warning}");
    }

    let config = playlist::load(&cli.playlist)?;
    let built = widget::build(&config);

    let audio_player =
        AudioPlayer::new(settings.audio.clone()).context("failed to start the audio thread")?;
    let mut controller = Controller::new(config, built.handles, audio_player)?
        .with_seek_step(settings.controls.seek_step_percent);
    controller.init();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &built.theme);

    controller.media_mut().quit_softly();
    controller.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
