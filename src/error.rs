//! Error types
//!
//! The engine has no fatal errors. Capture failures are handed back to the
//! caller so it can retry; storage failures are logged and absorbed.

use thiserror::Error;

/// Failure to start a session
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The hand-tracking input source could not be acquired
    #[error("hand capture unavailable: {reason}")]
    CaptureUnavailable { reason: String },
}

impl SessionError {
    pub fn capture_unavailable(reason: impl Into<String>) -> Self {
        Self::CaptureUnavailable {
            reason: reason.into(),
        }
    }
}

/// Failure to write to a key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// No storage backend is reachable (e.g. LocalStorage disabled)
    #[error("storage unavailable")]
    Unavailable,

    /// The backend rejected the write
    #[error("failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// The value could not be serialized
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    /// A later write may succeed (quota freed, storage re-enabled)
    pub fn is_recoverable(&self) -> bool {
        match self {
            StorageError::Unavailable => true,
            StorageError::WriteFailed { .. } => true,
            StorageError::Encode(_) => false,
        }
    }
}
