use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use resizer_core::{PartitionPolicy, ScaleMode, ScaleSettings};
use resizer_engine::EngineConfig;
use resizer_logging::{level_for_verbosity, LogDestination, LogOptions};

#[derive(Debug, Parser)]
#[command(
    name = "batch-resizer",
    version,
    about = "Resize PNG and JPEG files in place, in parallel"
)]
pub struct Cli {
    /// Image files to resize in place (png, jpg, jpeg). Other files are skipped.
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// How the scale values are interpreted. Defaults to the saved mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Horizontal scale in percent (percentage mode).
    #[arg(long, value_name = "PERCENT")]
    pub scale_x: Option<u32>,

    /// Vertical scale in percent (percentage mode).
    #[arg(long, value_name = "PERCENT")]
    pub scale_y: Option<u32>,

    /// Bounding box width in pixels (absolute mode).
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Bounding box height in pixels (absolute mode).
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Maximum number of chunks converted at the same time.
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Split into one chunk per worker instead of the 20/40 file thresholds.
    #[arg(long)]
    pub even_split: bool,

    /// JPEG output quality.
    #[arg(long, default_value_t = 75, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    /// Settings file to load (and save with --save-settings).
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Remember the effective mode and scale values for later runs.
    #[arg(long)]
    pub save_settings: bool,

    /// Also write the log to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Percentage,
    Absolute,
}

impl From<ModeArg> for ScaleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Percentage => ScaleMode::Percentage,
            ModeArg::Absolute => ScaleMode::Absolute,
        }
    }
}

impl Cli {
    /// Layers command-line values over the stored settings.
    pub fn apply_overrides(&self, mut settings: ScaleSettings) -> ScaleSettings {
        if let Some(x) = self.scale_x {
            settings.percent_width = x;
        }
        if let Some(y) = self.scale_y {
            settings.percent_height = y;
        }
        if let Some(width) = self.width {
            settings.absolute_width = width;
        }
        if let Some(height) = self.height {
            settings.absolute_height = height;
        }

        let gave_percent = self.scale_x.is_some() || self.scale_y.is_some();
        let gave_pixels = self.width.is_some() || self.height.is_some();
        settings.mode = match (self.mode, gave_percent, gave_pixels) {
            (Some(mode), _, _) => mode.into(),
            (None, true, false) => ScaleMode::Percentage,
            (None, false, true) => ScaleMode::Absolute,
            _ => settings.mode,
        };
        settings
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            worker_threads: self.workers.max(1),
            jpeg_quality: self.jpeg_quality,
        }
    }

    pub fn policy(&self) -> PartitionPolicy {
        if self.even_split {
            PartitionPolicy::Even {
                workers: self.workers.max(1),
            }
        } else {
            PartitionPolicy::default()
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            destination: match &self.log_file {
                Some(path) => LogDestination::Both(path.clone()),
                None => LogDestination::Terminal,
            },
            level: level_for_verbosity(self.verbose),
        }
    }
}
