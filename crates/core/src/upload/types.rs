//! Upload types and data structures.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use podorder_shared::UploadLimits;

use super::error::UploadError;
use super::retry::RetryPolicy;
use crate::storage::ObjectLocator;

/// One binary file submitted for upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    name: String,
    content_type: String,
    bytes: Bytes,
}

impl Attachment {
    /// Create an attachment from its original file name, MIME type and contents.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File contents.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Logical bucket/prefix attachments are stored under, e.g. `orders/ORD123/designs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DestinationNamespace(String);

impl DestinationNamespace {
    /// Validate and wrap a namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is empty, has a leading or trailing
    /// slash, or contains empty, `.` or `..` segments.
    pub fn new(namespace: impl Into<String>) -> Result<Self, UploadError> {
        let namespace = namespace.into();
        let valid = namespace
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

        if valid {
            Ok(Self(namespace))
        } else {
            Err(UploadError::InvalidNamespace(namespace))
        }
    }

    /// Returns the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Limits and pacing for the upload pipeline.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Maximum attachment size in bytes.
    pub max_file_size: u64,
    /// Files uploaded concurrently per batch.
    pub batch_size: usize,
    /// Total attempts per file, including the first.
    pub max_attempts: u32,
    /// Delay between attempts of one file.
    pub retry_delay: Duration,
    /// Delay between batches.
    pub batch_delay: Duration,
}

impl UploadSettings {
    /// Default max file size: 30 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 30 * 1024 * 1024;
    /// Default batch size.
    pub const DEFAULT_BATCH_SIZE: usize = 3;
    /// Default pacing delay between batches.
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set batch size (clamped to at least 1).
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set total attempts per file (clamped to at least 1).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set delay between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set delay between batches.
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Retry policy derived from these settings.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.retry_delay)
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            retry_delay: RetryPolicy::DEFAULT_DELAY,
            batch_delay: Self::DEFAULT_BATCH_DELAY,
        }
    }
}

impl From<&UploadLimits> for UploadSettings {
    fn from(limits: &UploadLimits) -> Self {
        Self::default()
            .with_max_file_size(limits.max_file_size)
            .with_batch_size(limits.batch_size)
            .with_max_attempts(limits.max_attempts)
            .with_retry_delay(Duration::from_millis(limits.retry_delay_ms))
            .with_batch_delay(Duration::from_millis(limits.batch_delay_ms))
    }
}

/// A file that could not be stored.
#[derive(Debug)]
pub struct FileFailure {
    /// Original file name.
    pub file: String,
    /// Why it failed.
    pub error: UploadError,
}

/// Per-call outcome of the batched pipeline.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Locators of stored files, in input order.
    pub locators: Vec<ObjectLocator>,
    /// Files that failed, in input order.
    pub failures: Vec<FileFailure>,
}

impl UploadReport {
    /// Files attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.locators.len() + self.failures.len()
    }

    /// Files stored.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.locators.len()
    }

    /// Files that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Some files failed but at least one was stored.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.locators.is_empty() && !self.failures.is_empty()
    }

    /// Collapse into the pipeline result.
    ///
    /// Any success yields the locator list; if nothing was stored and at
    /// least one file was attempted, the first failure is wrapped in
    /// [`UploadError::PipelineFailed`].
    ///
    /// # Errors
    ///
    /// Returns `PipelineFailed` when every attempted file failed.
    pub fn into_result(self) -> Result<Vec<ObjectLocator>, UploadError> {
        if self.locators.is_empty() {
            let failed = self.failures.len();
            if let Some(first) = self.failures.into_iter().next() {
                return Err(UploadError::PipelineFailed {
                    failed,
                    source: Box::new(first.error),
                });
            }
        }
        Ok(self.locators)
    }
}
