use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use resizer_logging::{resizer_debug, resizer_error};
use tokio_util::sync::CancellationToken;

use crate::{
    convert_images, BatchId, ConversionReport, ConvertError, EngineConfig, EngineEvent,
    ResizeSpec, Resizer,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start worker pool: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Convert {
        batch_id: BatchId,
        chunk_index: usize,
        spec: ResizeSpec,
        paths: Vec<PathBuf>,
        cancel: CancellationToken,
    },
}

/// Runs chunks on a bounded worker pool and reports one event per chunk.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: Mutex<CancellationToken>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_resizer(config, Arc::new(config.resizer()))
    }

    pub fn with_resizer(
        config: EngineConfig,
        resizer: Arc<dyn Resizer>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(config.worker_threads.max(1))
            .thread_name("resizer-worker")
            .build()?;

        thread::Builder::new()
            .name("resizer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let resizer = resizer.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(resizer, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            cancel: Mutex::new(CancellationToken::new()),
        })
    }

    pub fn enqueue(
        &self,
        batch_id: BatchId,
        chunk_index: usize,
        spec: ResizeSpec,
        paths: Vec<PathBuf>,
    ) {
        let cancel = match self.cancel.lock() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let _ = self.cmd_tx.send(EngineCommand::Convert {
            batch_id,
            chunk_index,
            spec,
            paths,
            cancel,
        });
    }

    /// Stops every enqueued chunk between files. Chunks enqueued afterwards run normally.
    pub fn cancel(&self) {
        let mut token = match self.cancel.lock() {
            Ok(token) => token,
            Err(poisoned) => poisoned.into_inner(),
        };
        token.cancel();
        *token = CancellationToken::new();
    }

    /// Waits up to `timeout`; distinguishes a quiet pool from a stopped one.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    resizer: Arc<dyn Resizer>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Convert {
            batch_id,
            chunk_index,
            spec,
            paths,
            cancel,
        } => {
            let started = Instant::now();
            let worker_paths = paths.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                convert_images(resizer.as_ref(), spec, &worker_paths, &cancel)
            })
            .await;

            // Panics are caught per file; this covers a unit that died outside of one.
            let report = outcome.unwrap_or_else(|err| {
                resizer_error!(
                    "Batch {} chunk {} worker failed: {}",
                    batch_id,
                    chunk_index,
                    err
                );
                ConversionReport::all_failed(paths, || ConvertError::WorkerPanicked)
            });
            let elapsed = started.elapsed();
            resizer_debug!(
                "Batch {} chunk {} converted {}/{} in {:?}",
                batch_id,
                chunk_index,
                report.converted,
                report.attempted(),
                elapsed
            );
            let _ = event_tx.send(EngineEvent::ChunkCompleted {
                batch_id,
                chunk_index,
                report,
                elapsed,
            });
        }
    }
}
