//! Persistence error types.

use thiserror::Error;

/// Errors reported by a list configuration storage backend.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("list configuration not found: {id}")]
    NotFound { id: String },

    #[error("storage io error: {message}")]
    Io { message: String },

    #[error("failed to encode or decode stored data: {message}")]
    Serialization { message: String },

    #[error("storage backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("storage rejected the request: {message}")]
    Rejected { message: String },
}

impl StorageError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates io error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Unavailable { .. })
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::io(value.to_string())
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(value: toml::de::Error) -> Self {
        Self::serialization(value.to_string())
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(value: toml::ser::Error) -> Self {
        Self::serialization(value.to_string())
    }
}
