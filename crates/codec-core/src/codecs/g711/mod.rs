//! G.711 codec implementation
//!
//! Only the μ-law (PCMU) variant is wired up: every RTP audio payload the
//! media generator produces is PCMU, payload type 0, 8 kHz mono. Encoding goes
//! through a pre-computed lookup table covering the whole 16-bit input range.

pub mod reference;
pub mod tables;

use crate::error::Result;
use crate::types::{AudioCodec, CodecInfo};

/// G.711 companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum G711Variant {
    /// μ-law (PCMU, payload type 0)
    MuLaw,
}

impl G711Variant {
    /// SDP encoding name
    pub fn name(&self) -> &'static str {
        match self {
            Self::MuLaw => "PCMU",
        }
    }

    /// Static RTP payload type
    pub fn payload_type(&self) -> u8 {
        match self {
            Self::MuLaw => 0,
        }
    }
}

/// Stateless G.711 encoder
#[derive(Debug, Clone, Copy)]
pub struct G711Codec {
    variant: G711Variant,
}

impl G711Codec {
    /// Create a μ-law codec
    pub fn pcmu() -> Self {
        Self {
            variant: G711Variant::MuLaw,
        }
    }

    /// The companding law in use
    pub fn variant(&self) -> G711Variant {
        self.variant
    }

    /// Encode into a caller-supplied buffer, returning the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `output` is shorter than `samples`.
    pub fn encode_into(&self, samples: &[i16], output: &mut [u8]) -> usize {
        match self.variant {
            G711Variant::MuLaw => tables::encode_mulaw_table(samples, &mut output[..samples.len()]),
        }
        samples.len()
    }
}

impl Default for G711Codec {
    fn default() -> Self {
        Self::pcmu()
    }
}

impl AudioCodec for G711Codec {
    fn encode(&self, samples: &[i16]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; samples.len()];
        self.encode_into(samples, &mut output);
        Ok(output)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: self.variant.name(),
            sample_rate: 8000,
            channels: 1,
            payload_type: self.variant.payload_type(),
        }
    }
}
