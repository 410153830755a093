//! Error types for media compilation

use std::path::PathBuf;

use sipcap_codec_core::CodecError;
use sipcap_rtp_core::RtpError;
use thiserror::Error;

/// Result type for media operations
pub type Result<T> = std::result::Result<T, MediaError>;

/// Errors raised while building scripts or compiling captures
#[derive(Error, Debug)]
pub enum MediaError {
    /// Script token that is not a valid `action:value` step
    #[error("Invalid step {token:?}: {reason}")]
    InvalidStep { token: String, reason: String },

    /// Audio file is not mono 16-bit linear PCM at 8kHz
    #[error("Unsupported sample format in {}: {details}", .path.display())]
    SampleFormat { path: PathBuf, details: String },

    /// Audio file could not be opened or read
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoder failure
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// RTP generator failure
    #[error("RTP error: {0}")]
    Rtp(#[from] RtpError),

    /// Packet would not fit in an IPv4 datagram
    #[error("Packet too large: {size} bytes")]
    PacketTooLarge { size: usize },

    /// Capture bytes could not be decoded
    #[error("Malformed capture: {0}")]
    MalformedCapture(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MediaError {
    pub fn invalid_step(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStep {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn sample_format(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::SampleFormat {
            path: path.into(),
            details: details.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify a WAV decoder error for the file at `path`
    pub fn from_wav(path: impl Into<PathBuf>, err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(source) => Self::io(path, source),
            other => Self::sample_format(path, other.to_string()),
        }
    }

    /// Whether the error was caused by caller-supplied input rather than the
    /// compiler itself
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStep { .. } | Self::SampleFormat { .. } | Self::Io { .. } | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_error_classification() {
        let io = MediaError::from_wav(
            "a.wav",
            hound::Error::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        );
        assert!(matches!(io, MediaError::Io { .. }));

        let format = MediaError::from_wav("b.wav", hound::Error::FormatError("no RIFF tag found"));
        assert!(matches!(format, MediaError::SampleFormat { .. }));
        assert!(format.is_input_error());
        assert!(format.to_string().contains("b.wav"));
    }

    #[test]
    fn test_invalid_step_message_names_token() {
        let err = MediaError::invalid_step("foo:bar", "unknown action");
        assert_eq!(err.to_string(), "Invalid step \"foo:bar\": unknown action");
    }
}
