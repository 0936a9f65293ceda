use crate::{BatchId, BatchSummary, ResizeRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one unit of work: convert `request.paths` on a background worker
    /// and report back with `Msg::ChunkDone`.
    ConvertChunk {
        batch_id: BatchId,
        chunk_index: usize,
        request: ResizeRequest,
    },
    /// Ask in-flight units to stop between files.
    CancelBatch { batch_id: BatchId },
    /// Every unit of the batch has reported. Emitted once per accepted batch.
    BatchComplete(BatchSummary),
}
