use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use resizer_logging::{resizer_info, resizer_warn};

use crate::view_model::{AppViewModel, BatchStatus};
use crate::{is_supported_image, Effect, PartitionPolicy, ResizeRequest, ScaleSettings};

pub type BatchId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate outcome of one batch, delivered with `Effect::BatchComplete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub converted: usize,
    pub total: usize,
    pub failures: Vec<FileFailure>,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn message(&self) -> String {
        format!(
            "{} of {} image files were successfully converted!",
            self.converted, self.total
        )
    }

    pub fn all_converted(&self) -> bool {
        self.converted == self.total
    }
}

/// Why a submission did not start a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRejection {
    BatchRunning,
    EmptyRequest,
    ZeroDimension,
}

impl fmt::Display for BatchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchRejection::BatchRunning => write!(f, "a batch is already running"),
            BatchRejection::EmptyRequest => write!(f, "no files to convert"),
            BatchRejection::ZeroDimension => write!(f, "scale parameters must be non-zero"),
        }
    }
}

/// Removes repeated paths, keeping the first occurrence of each.
fn dedup_paths(paths: &mut Vec<PathBuf>) {
    let mut seen = HashSet::with_capacity(paths.len());
    paths.retain(|path| seen.insert(path.clone()));
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChunkSlot {
    size: usize,
    reported: bool,
}

/// Tracking state of the one in-flight batch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BatchJob {
    id: BatchId,
    total: usize,
    chunks: Vec<ChunkSlot>,
    completed: usize,
    converted: usize,
    failures: Vec<FileFailure>,
    cancelled: bool,
}

impl BatchJob {
    fn new(id: BatchId, chunk_sizes: &[usize]) -> Self {
        Self {
            id,
            total: chunk_sizes.iter().sum(),
            chunks: chunk_sizes
                .iter()
                .map(|&size| ChunkSlot {
                    size,
                    reported: false,
                })
                .collect(),
            completed: 0,
            converted: 0,
            failures: Vec::new(),
            cancelled: false,
        }
    }

    fn expected(&self) -> usize {
        self.chunks.len()
    }

    fn is_complete(&self) -> bool {
        self.completed == self.expected()
    }

    /// Returns false for reports that must not count: unknown or repeated units.
    fn record(&mut self, chunk_index: usize, converted: usize, failures: Vec<FileFailure>) -> bool {
        let Some(slot) = self.chunks.get_mut(chunk_index) else {
            resizer_warn!(
                "Batch {} ignoring report for unknown chunk {}",
                self.id,
                chunk_index
            );
            return false;
        };
        if slot.reported {
            resizer_warn!(
                "Batch {} ignoring duplicate report for chunk {}",
                self.id,
                chunk_index
            );
            return false;
        }
        slot.reported = true;
        if converted > slot.size {
            resizer_warn!(
                "Batch {} chunk {} reported {} conversions for {} files",
                self.id,
                chunk_index,
                converted,
                slot.size
            );
        }
        self.converted += converted.min(slot.size);
        self.failures.extend(failures);
        self.completed += 1;
        true
    }

    fn into_summary(self) -> BatchSummary {
        BatchSummary {
            batch_id: self.id,
            converted: self.converted,
            total: self.total,
            failures: self.failures,
            cancelled: self.cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    files: Vec<PathBuf>,
    settings: ScaleSettings,
    policy: PartitionPolicy,
    batch: Option<BatchJob>,
    last_batch_id: BatchId,
    last_summary: Option<BatchSummary>,
    last_rejection: Option<BatchRejection>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ScaleSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_policy(mut self, policy: PartitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn view(&self) -> AppViewModel {
        let batch = match &self.batch {
            Some(job) => BatchStatus::Running {
                batch_id: job.id,
                completed_units: job.completed,
                expected_units: job.expected(),
                cancelling: job.cancelled,
            },
            None => BatchStatus::Idle,
        };
        AppViewModel {
            files: self.files.clone(),
            settings: self.settings,
            batch,
            last_summary: self.last_summary.clone(),
            last_rejection: self.last_rejection,
            dirty: self.dirty,
        }
    }

    pub fn settings(&self) -> &ScaleSettings {
        &self.settings
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_running(&self) -> bool {
        self.batch.is_some()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Appends supported paths not already listed; returns how many were kept.
    pub(crate) fn add_files(&mut self, paths: Vec<PathBuf>) -> usize {
        let before = self.files.len();
        let mut seen: HashSet<PathBuf> = self.files.iter().cloned().collect();
        self.files.extend(
            paths
                .into_iter()
                .filter(|path| is_supported_image(path) && seen.insert(path.clone())),
        );
        let added = self.files.len() - before;
        if added > 0 {
            self.mark_dirty();
        }
        added
    }

    pub(crate) fn remove_files(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable();
        indices.dedup();
        for index in indices.into_iter().rev() {
            if index < self.files.len() {
                self.files.remove(index);
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn clear_files(&mut self) {
        if !self.files.is_empty() {
            self.files.clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn set_settings(&mut self, settings: ScaleSettings) {
        if self.settings != settings {
            self.settings = settings;
            self.mark_dirty();
        }
    }

    pub(crate) fn request_from_files(&self) -> ResizeRequest {
        self.settings.request_for(self.files.clone())
    }

    /// Partitions the request and opens a batch, returning one effect per chunk.
    pub(crate) fn begin_batch(
        &mut self,
        request: ResizeRequest,
    ) -> Result<Vec<Effect>, BatchRejection> {
        let outcome = self.try_begin_batch(request);
        self.last_rejection = outcome.as_ref().err().copied();
        self.mark_dirty();
        outcome
    }

    fn try_begin_batch(
        &mut self,
        mut request: ResizeRequest,
    ) -> Result<Vec<Effect>, BatchRejection> {
        if self.batch.is_some() {
            return Err(BatchRejection::BatchRunning);
        }
        if request.is_empty() {
            return Err(BatchRejection::EmptyRequest);
        }
        if request.v0 == 0 || request.v1 == 0 {
            return Err(BatchRejection::ZeroDimension);
        }

        // Chunks must be disjoint: two units never touch the same file.
        let listed = request.len();
        dedup_paths(&mut request.paths);
        if request.len() < listed {
            resizer_warn!(
                "Dropped {} duplicate path(s) from the request",
                listed - request.len()
            );
        }

        let chunks = self.policy.split(&request.paths);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        self.last_batch_id += 1;
        let batch_id = self.last_batch_id;
        resizer_info!(
            "Batch {} dispatching {} files as chunks {:?} ({:?} {}x{})",
            batch_id,
            request.len(),
            sizes,
            request.mode,
            request.v0,
            request.v1
        );
        self.batch = Some(BatchJob::new(batch_id, &sizes));

        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(chunk_index, paths)| Effect::ConvertChunk {
                batch_id,
                chunk_index,
                request: request.with_paths(paths),
            })
            .collect())
    }

    /// Records one unit's report. Returns the summary when it was the last one.
    pub(crate) fn record_chunk(
        &mut self,
        batch_id: BatchId,
        chunk_index: usize,
        converted: usize,
        failures: Vec<FileFailure>,
    ) -> Option<BatchSummary> {
        let job = match self.batch.as_mut() {
            Some(job) if job.id == batch_id => job,
            _ => {
                resizer_warn!(
                    "Ignoring report for batch {} chunk {}: not the running batch",
                    batch_id,
                    chunk_index
                );
                return None;
            }
        };
        if !job.record(chunk_index, converted, failures) {
            return None;
        }
        self.dirty = true;
        if !job.is_complete() {
            return None;
        }

        let summary = self.batch.take()?.into_summary();
        resizer_info!(
            "Batch {} complete: {} of {} converted{}",
            summary.batch_id,
            summary.converted,
            summary.total,
            if summary.cancelled { " (cancelled)" } else { "" }
        );
        self.files.clear();
        self.last_summary = Some(summary.clone());
        Some(summary)
    }

    /// Flags the running batch as cancelled; `None` when idle or already cancelling.
    pub(crate) fn request_cancel(&mut self) -> Option<BatchId> {
        let job = self.batch.as_mut()?;
        if job.cancelled {
            return None;
        }
        job.cancelled = true;
        self.dirty = true;
        Some(job.id)
    }
}
