//! Error handling for the codec library

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding audio
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Encoding operation failed
    #[error("Encoding failed: {reason}")]
    EncodingFailed {
        /// Failure description
        reason: String,
    },
}

impl CodecError {
    /// Create a new encoding failed error
    pub fn encoding_failed(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }
}
