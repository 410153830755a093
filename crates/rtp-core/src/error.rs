use thiserror::Error;

/// Result type for RTP operations
pub type Result<T> = std::result::Result<T, RtpError>;

/// Errors raised while building or parsing RTP frames
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RtpError {
    /// Not enough bytes to decode a structure
    #[error("Buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall { required: usize, available: usize },

    /// Structurally invalid frame
    #[error("Invalid RTP packet: {0}")]
    InvalidPacket(String),

    /// Value that does not map to an RFC 4733 event code
    #[error("Invalid DTMF digit: {0:?}")]
    InvalidDigit(String),

    /// Generator configured with an unusable packetization interval
    #[error("Invalid packetization interval: {0}ms")]
    InvalidPtime(u32),
}
