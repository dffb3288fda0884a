//! Structured events emitted by the upload pipeline.

use std::time::Duration;

use tracing::{debug, error, info, warn};

/// Something observable that happened during a pipeline call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// A store attempt failed.
    AttemptFailed {
        /// File name.
        file: String,
        /// Attempt number, starting at 1.
        attempt: u32,
        /// Whether another attempt follows.
        will_retry: bool,
        /// Storage error message.
        error: String,
    },
    /// A file was stored.
    FileStored {
        /// File name.
        file: String,
        /// Public locator.
        locator: String,
        /// Attempts it took.
        attempts: u32,
    },
    /// A file was given up on.
    FileFailed {
        /// File name.
        file: String,
        /// Final error message.
        error: String,
    },
    /// Every file in a batch settled.
    BatchSettled {
        /// Batch index, starting at 0.
        batch: usize,
        /// Files in the batch.
        size: usize,
        /// Files stored.
        succeeded: usize,
        /// Files failed.
        failed: usize,
    },
    /// The pipeline is pausing before the next batch.
    BatchPaced {
        /// Index of the batch that just settled.
        batch: usize,
        /// Pause length.
        delay: Duration,
    },
    /// The pipeline call finished.
    Completed {
        /// Destination namespace.
        namespace: String,
        /// Files attempted.
        attempted: usize,
        /// Files stored.
        succeeded: usize,
        /// Files failed.
        failed: usize,
    },
}

/// Sink for pipeline events.
pub trait UploadObserver: Send + Sync {
    /// Record one event.
    fn record(&self, event: &UploadEvent);
}

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl UploadObserver for TracingObserver {
    fn record(&self, event: &UploadEvent) {
        match event {
            UploadEvent::AttemptFailed {
                file,
                attempt,
                will_retry,
                error,
            } => warn!(%file, attempt, will_retry, %error, "Upload attempt failed"),
            UploadEvent::FileStored {
                file,
                locator,
                attempts,
            } => debug!(%file, %locator, attempts, "Stored attachment"),
            UploadEvent::FileFailed { file, error } => {
                error!(%file, %error, "Failed to upload attachment");
            }
            UploadEvent::BatchSettled {
                batch,
                size,
                succeeded,
                failed,
            } => debug!(batch, size, succeeded, failed, "Upload batch settled"),
            UploadEvent::BatchPaced { batch, delay } => {
                debug!(batch, delay = ?delay, "Pacing before next batch");
            }
            UploadEvent::Completed {
                namespace,
                attempted,
                succeeded,
                failed,
            } => {
                if *failed > 0 && *succeeded > 0 {
                    warn!(%namespace, attempted, succeeded, failed, "Upload partially succeeded");
                } else if *failed > 0 {
                    error!(%namespace, attempted, failed, "Upload failed for every attachment");
                } else {
                    info!(%namespace, attempted, succeeded, "Upload completed");
                }
            }
        }
    }
}
