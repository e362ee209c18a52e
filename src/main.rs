use std::process::ExitCode;

mod audio;
mod config;
mod fetch;
mod player;
mod playlist;
mod runtime;
mod ui;
mod widget;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "fatal");
            eprintln!("Musik: {e:#}");
            ExitCode::FAILURE
        }
    }
}
