//! Upload error types.

use podorder_shared::AppError;
use thiserror::Error;

use crate::storage::StorageError;

/// Upload pipeline errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Attachment exceeds the size ceiling. Never retried.
    #[error("file '{file}' is {size} bytes, exceeding the maximum of {max} bytes")]
    PayloadTooLarge {
        /// Attachment file name.
        file: String,
        /// Actual size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// Storage write failed on every attempt.
    #[error("failed to store '{file}' after {attempts} attempt(s): {source}")]
    StoreFailed {
        /// Attachment file name.
        file: String,
        /// Attempts made before giving up.
        attempts: u32,
        /// Error from the last attempt.
        source: StorageError,
    },

    /// Every attempted attachment in a pipeline call failed.
    #[error("all {failed} attachment(s) failed to upload; first failure: {source}")]
    PipelineFailed {
        /// Number of failed attachments.
        failed: usize,
        /// First failure encountered, in input order.
        source: Box<UploadError>,
    },

    /// Destination namespace is malformed.
    #[error("invalid destination namespace: {0}")]
    InvalidNamespace(String),
}

impl UploadError {
    /// Create a payload too large error.
    #[must_use]
    pub fn payload_too_large(file: impl Into<String>, size: u64, max: u64) -> Self {
        Self::PayloadTooLarge {
            file: file.into(),
            size,
            max,
        }
    }

    /// Create a store failed error.
    #[must_use]
    pub fn store_failed(file: impl Into<String>, attempts: u32, source: StorageError) -> Self {
        Self::StoreFailed {
            file: file.into(),
            attempts,
            source,
        }
    }

    /// The file name a per-file error refers to.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::PayloadTooLarge { file, .. } | Self::StoreFailed { file, .. } => Some(file),
            Self::PipelineFailed { source, .. } => source.file(),
            Self::InvalidNamespace(_) => None,
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::PayloadTooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            UploadError::InvalidNamespace(_) => Self::Validation(err.to_string()),
            UploadError::StoreFailed { .. } | UploadError::PipelineFailed { .. } => {
                Self::Storage(err.to_string())
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::NotFound(err.to_string()),
            StorageError::InvalidKey(_) => Self::Validation(err.to_string()),
            StorageError::Configuration(_) => Self::Configuration(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}
