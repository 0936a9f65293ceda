//! Batch image resizer: resizes PNG and JPEG files in place, in parallel.
use std::process::ExitCode;

use clap::Parser;

mod app;
mod cli;
mod effects;
mod interrupt;
mod settings;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    resizer_logging::initialize(&cli.log_options());

    match app::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(app::EXIT_SETUP_ERROR)
        }
    }
}
