//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Object not found in storage.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Object exists and overwriting was not allowed.
    #[error("object already exists: {key}")]
    AlreadyExists {
        /// Storage key that already exists.
        key: String,
    },

    /// Operation not supported by the provider.
    #[error("operation not supported by storage provider: {0}")]
    Unsupported(String),

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error (network, server, quota).
    #[error("storage operation failed: {0}")]
    Operation(String),

    /// Invalid storage key format.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Malformed keys are validation failures; everything the backend
    /// reports is treated as transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidKey(_))
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::ConditionNotMatch | opendal::ErrorKind::AlreadyExists => {
                Self::AlreadyExists {
                    key: err.to_string(),
                }
            }
            opendal::ErrorKind::Unsupported => Self::Unsupported(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(StorageError::operation("503 Service Unavailable").is_retryable());
        assert!(StorageError::not_found("orders/a.png").is_retryable());
        assert!(StorageError::configuration("bad endpoint").is_retryable());
        assert!(!StorageError::invalid_key("orders//a.png").is_retryable());
    }

    #[test]
    fn test_from_opendal_error() {
        let err: StorageError =
            opendal::Error::new(opendal::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, StorageError::NotFound { .. }));

        let err: StorageError =
            opendal::Error::new(opendal::ErrorKind::Unexpected, "connection reset").into();
        assert!(matches!(err, StorageError::Operation(_)));
    }
}
