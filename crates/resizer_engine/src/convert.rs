use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use resizer_logging::{resizer_debug, resizer_trace, resizer_warn};
use tokio_util::sync::CancellationToken;

use crate::{ConversionReport, ConvertError, FileFailure, ResizeSpec, Resizer};

/// Resizes every path in order and counts the files that were rewritten.
///
/// Per-file failures never abort the run; they are collected in the report.
/// A resizer that panics fails only the file it was working on.
/// Once `cancel` fires, the remaining paths are reported as cancelled.
pub fn convert_images(
    resizer: &dyn Resizer,
    spec: ResizeSpec,
    paths: &[PathBuf],
    cancel: &CancellationToken,
) -> ConversionReport {
    let mut report = ConversionReport::default();
    for path in paths {
        if cancel.is_cancelled() {
            report.failures.push(FileFailure {
                path: path.clone(),
                error: ConvertError::Cancelled,
            });
            continue;
        }
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| resizer.resize_file(path, spec)))
            .unwrap_or(Err(ConvertError::WorkerPanicked));
        match outcome {
            Ok(size) => {
                resizer_trace!("Resized {:?} to {}x{}", path, size.width, size.height);
                report.converted += 1;
            }
            Err(error) => {
                match &error {
                    ConvertError::Decode(_) => resizer_debug!("Skipping {:?}: {}", path, error),
                    _ => resizer_warn!("Failed to convert {:?}: {}", path, error),
                }
                report.failures.push(FileFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    report
}
