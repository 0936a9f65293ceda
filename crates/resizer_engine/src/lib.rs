//! Resizer engine: image conversion and the worker pool that runs it.
mod config;
mod convert;
mod engine;
mod geometry;
mod persist;
mod resize;
mod types;

pub use config::EngineConfig;
pub use convert::convert_images;
pub use engine::{EngineError, EngineHandle};
pub use geometry::{fit_within, target_box, Dimensions};
pub use persist::{ensure_dir, replace_file, PersistError};
pub use resize::{ImageCrateResizer, Resizer};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    BatchId, ConversionReport, ConvertError, EngineEvent, FileFailure, ResizeSpec, ScaleMode,
};
