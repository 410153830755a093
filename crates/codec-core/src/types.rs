//! Core codec types and traits

use crate::error::Result;

/// Audio encoder used to turn linear PCM into RTP payload bytes.
///
/// Implementations are stateless transforms, so `encode` borrows `self`
/// immutably and may be shared freely between independent compilations.
pub trait AudioCodec: Send + Sync {
    /// Encode 16-bit linear PCM samples into the codec's wire format
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be encoded
    fn encode(&self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Static information about the codec
    fn info(&self) -> CodecInfo;
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name (e.g., "PCMU")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Static RTP payload type
    pub payload_type: u8,
}
