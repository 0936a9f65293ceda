use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use resizer_core::{is_supported_image, update, AppState, BatchRejection, BatchStatus, BatchSummary, Effect, Msg};
use resizer_logging::{resizer_info, resizer_warn};

use crate::cli::Cli;
use crate::effects::EffectRunner;
use crate::interrupt::Interrupt;
use crate::settings;

/// Some files were not converted.
pub const EXIT_PARTIAL: u8 = 1;
/// Nothing was attempted: bad arguments, no usable files, engine failure.
pub const EXIT_SETUP_ERROR: u8 = 2;

/// How often the loop looks for Ctrl-C while waiting on the pool.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let settings_path = cli.settings.clone().or_else(settings::default_path);
    let stored = settings_path
        .as_deref()
        .map(settings::load)
        .unwrap_or_default();
    let scale = cli.apply_overrides(stored);
    if cli.save_settings {
        match &settings_path {
            Some(path) => settings::save(path, &scale),
            None => resizer_warn!("No config directory available; settings not saved"),
        }
    }

    let state = AppState::new()
        .with_settings(scale)
        .with_policy(cli.policy());
    let (state, mut effects) = update(state, Msg::FilesAdded(cli.paths.clone()));
    let skipped = cli
        .paths
        .iter()
        .filter(|path| !is_supported_image(path))
        .count();
    if skipped > 0 {
        resizer_warn!("Skipping {} file(s) without a png/jpg/jpeg extension", skipped);
    }
    // Stored auto-convert may already have submitted on add.
    let state = if state.is_running() {
        state
    } else {
        let (next, convert_effects) = update(state, Msg::ConvertClicked);
        effects.extend(convert_effects);
        next
    };
    finish(state, effects, cli)
}

fn finish(state: AppState, effects: Vec<Effect>, cli: &Cli) -> anyhow::Result<ExitCode> {
    match state.view().last_rejection {
        Some(BatchRejection::EmptyRequest) => {
            bail!("no supported image files (png, jpg, jpeg) given")
        }
        Some(rejection) => bail!("cannot start conversion: {rejection}"),
        None => {}
    }

    let runner = EffectRunner::new(cli.engine_config()).context("starting worker pool")?;
    let summary = drive(state, effects, &runner, &Interrupt::install())?;

    if summary.cancelled {
        eprintln!("Conversion cancelled");
    }
    println!("{}", summary.message());
    for failure in &summary.failures {
        eprintln!("  {}: {}", failure.path.display(), failure.reason);
    }
    Ok(if summary.all_converted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PARTIAL)
    })
}

/// Feeds engine reports into the state machine until the batch completes.
fn drive(
    mut state: AppState,
    mut effects: Vec<Effect>,
    runner: &EffectRunner,
    interrupt: &Interrupt,
) -> anyhow::Result<BatchSummary> {
    loop {
        let mut finished = None;
        for effect in effects.drain(..) {
            if let Some(summary) = runner.apply(effect) {
                finished = Some(summary);
            }
        }
        if let Some(summary) = finished {
            return Ok(summary);
        }

        if interrupt.take() {
            (state, effects) = update(state, Msg::CancelClicked);
            continue;
        }
        let Some(msg) = runner.next_msg(POLL_INTERVAL)? else {
            continue;
        };
        (state, effects) = update(state, msg);
        if let BatchStatus::Running {
            completed_units,
            expected_units,
            ..
        } = state.view().batch
        {
            resizer_info!("{}/{} chunks done", completed_units, expected_units);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use resizer_core::{ResizeRequest, ScaleMode};
    use resizer_engine::EngineConfig;

    use super::*;

    #[test]
    fn interrupt_cancels_running_batch_and_still_finishes() {
        resizer_logging::initialize_for_tests();
        let temp = tempfile::TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..30)
            .map(|i| temp.path().join(format!("missing_{i}.png")))
            .collect();
        let request = ResizeRequest::new(ScaleMode::Percentage, 50, 50, paths);
        let (state, effects) = update(AppState::new(), Msg::SubmitBatch(request));
        let runner = EffectRunner::new(EngineConfig::default()).unwrap();
        let interrupt = Interrupt::default();
        interrupt.request();

        let summary = drive(state, effects, &runner, &interrupt).unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.total, 30);
        assert_eq!(summary.failures.len(), 30);
        assert!(!interrupt.take());
    }
}
