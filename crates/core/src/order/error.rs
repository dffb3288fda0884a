//! Order submission error types.

use podorder_shared::AppError;
use thiserror::Error;

use super::types::AttachmentCategory;
use crate::upload::UploadError;

/// Order submission errors.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission is incomplete or malformed.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// Every attachment of a category failed to upload.
    #[error("failed to upload {category:?} attachments: {source}")]
    Upload {
        /// Category that failed.
        category: AttachmentCategory,
        /// Pipeline error.
        source: UploadError,
    },

    /// The record store rejected the order.
    #[error("record store error: {0}")]
    Record(String),
}

impl SubmissionError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a record store error.
    #[must_use]
    pub fn record(msg: impl Into<String>) -> Self {
        Self::Record(msg.into())
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(_) => Self::Validation(err.to_string()),
            SubmissionError::Upload { source, .. } => source.into(),
            SubmissionError::Record(_) => Self::RecordStore(err.to_string()),
        }
    }
}
