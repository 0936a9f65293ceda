use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use anyhow::bail;
use resizer_core::{BatchSummary, Effect, FileFailure, Msg, ScaleMode};
use resizer_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, ResizeSpec};
use resizer_logging::{resizer_debug, resizer_info};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    /// Returns the summary when the effect announces a finished batch.
    pub fn apply(&self, effect: Effect) -> Option<BatchSummary> {
        match effect {
            Effect::ConvertChunk {
                batch_id,
                chunk_index,
                request,
            } => {
                resizer_info!(
                    "ConvertChunk batch_id={} chunk={} files={}",
                    batch_id,
                    chunk_index,
                    request.len()
                );
                let spec = ResizeSpec::new(map_mode(request.mode), request.v0, request.v1);
                self.engine
                    .enqueue(batch_id, chunk_index, spec, request.paths);
                None
            }
            Effect::CancelBatch { batch_id } => {
                resizer_info!("CancelBatch batch_id={}", batch_id);
                self.engine.cancel();
                None
            }
            Effect::BatchComplete(summary) => Some(summary),
        }
    }

    /// Waits up to `timeout` for a unit to report. Fails if the engine has stopped.
    pub fn next_msg(&self, timeout: Duration) -> anyhow::Result<Option<Msg>> {
        let event = match self.engine.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                bail!("worker pool stopped before the batch finished")
            }
        };
        Ok(Some(match event {
            EngineEvent::ChunkCompleted {
                batch_id,
                chunk_index,
                report,
                elapsed,
            } => {
                resizer_debug!(
                    "Chunk {} of batch {} reported after {:?}",
                    chunk_index,
                    batch_id,
                    elapsed
                );
                Msg::ChunkDone {
                    batch_id,
                    chunk_index,
                    converted: report.converted,
                    failures: report
                        .failures
                        .into_iter()
                        .map(|failure| FileFailure {
                            path: failure.path,
                            reason: failure.error.to_string(),
                        })
                        .collect(),
                }
            }
        }))
    }
}

fn map_mode(mode: ScaleMode) -> resizer_engine::ScaleMode {
    match mode {
        ScaleMode::Percentage => resizer_engine::ScaleMode::Percentage,
        ScaleMode::Absolute => resizer_engine::ScaleMode::Absolute,
    }
}
