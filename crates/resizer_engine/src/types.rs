use std::path::PathBuf;
use std::time::Duration;

use crate::persist::PersistError;

pub type BatchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    Percentage,
    Absolute,
}

/// Mode and the two scale parameters shared by every file of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub mode: ScaleMode,
    pub v0: u32,
    pub v1: u32,
}

impl ResizeSpec {
    pub fn new(mode: ScaleMode, v0: u32, v1: u32) -> Self {
        Self { mode, v0, v1 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("cannot write image format {extension:?}")]
    UnsupportedFormat { extension: String },
    #[error("scaled size {width}x{height} is empty")]
    EmptyTarget { width: u32, height: u32 },
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("failed to write image: {0}")]
    Write(#[from] PersistError),
    #[error("cancelled before processing")]
    Cancelled,
    #[error("worker panicked")]
    WorkerPanicked,
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ConvertError,
}

/// Outcome of one unit of work.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Files resized and rewritten.
    pub converted: usize,
    pub failures: Vec<FileFailure>,
}

impl ConversionReport {
    pub fn attempted(&self) -> usize {
        self.converted + self.failures.len()
    }

    /// Every path failed with the error produced by `error`.
    pub(crate) fn all_failed(paths: Vec<PathBuf>, error: impl Fn() -> ConvertError) -> Self {
        Self {
            converted: 0,
            failures: paths
                .into_iter()
                .map(|path| FileFailure {
                    path,
                    error: error(),
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub enum EngineEvent {
    /// A unit finished its chunk. Sent exactly once per enqueued chunk.
    ChunkCompleted {
        batch_id: BatchId,
        chunk_index: usize,
        report: ConversionReport,
        elapsed: Duration,
    },
}
