use std::path::PathBuf;

use crate::{BatchId, BatchRejection, BatchSummary, ScaleSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchStatus {
    #[default]
    Idle,
    Running {
        batch_id: BatchId,
        completed_units: usize,
        expected_units: usize,
        cancelling: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub files: Vec<PathBuf>,
    pub settings: ScaleSettings,
    pub batch: BatchStatus,
    pub last_summary: Option<BatchSummary>,
    pub last_rejection: Option<BatchRejection>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Input controls stay disabled while this is true.
    pub fn busy(&self) -> bool {
        matches!(self.batch, BatchStatus::Running { .. })
    }
}
