use bytes::Bytes;

use super::PayloadGenerator;
use crate::error::RtpError;
use crate::packet::RtpHeader;
use crate::time::{clock_rates, samples_per_frame};
use crate::Result;

/// Static payload type for PCMU
pub const PCMU_PAYLOAD_TYPE: u8 = 0;

/// μ-law encoding of linear zero
pub const PCMU_SILENCE: u8 = 0xFF;

/// G.711 μ-law audio frame generator
///
/// Without media attached the frame carries one packetization interval of
/// silence.
#[derive(Debug, Clone)]
pub struct PcmuPayload {
    header: RtpHeader,
    ptime: u32,
    media: Option<Bytes>,
}

impl PcmuPayload {
    /// Default packetization interval in milliseconds
    pub const PTIME: u32 = 20;

    /// Create a generator for the given packetization interval
    pub fn new(ptime: u32) -> Result<Self> {
        Self::with_payload_type(ptime, PCMU_PAYLOAD_TYPE)
    }

    /// Create a generator with a non-default payload type
    pub fn with_payload_type(ptime: u32, payload_type: u8) -> Result<Self> {
        if ptime == 0 {
            return Err(RtpError::InvalidPtime(ptime));
        }
        Ok(Self {
            header: RtpHeader::new(payload_type),
            ptime,
            media: None,
        })
    }

    /// Samples carried per frame at 8kHz
    pub fn samples_per_frame(&self) -> usize {
        samples_per_frame(clock_rates::AUDIO_8KHZ, self.ptime) as usize
    }

    /// Attach already-encoded media, replacing the silence body
    pub fn set_media(&mut self, encoded: impl Into<Bytes>) {
        self.media = Some(encoded.into());
    }
}

impl PayloadGenerator for PcmuPayload {
    fn ptime(&self) -> u32 {
        self.ptime
    }

    fn timestamp_interval(&self) -> u32 {
        samples_per_frame(clock_rates::AUDIO_8KHZ, self.ptime)
    }

    fn header(&self) -> &RtpHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RtpHeader {
        &mut self.header
    }

    fn payload(&self) -> Bytes {
        match &self.media {
            Some(media) => media.clone(),
            None => Bytes::from(vec![PCMU_SILENCE; self.samples_per_frame()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_frame() {
        let mut payload = PcmuPayload::new(PcmuPayload::PTIME).unwrap();
        payload.set_marker(true);
        payload.set_sequence_number(1);
        payload.set_timestamp(160);
        payload.set_ssrc(7);

        assert_eq!(payload.ptime(), 20);
        assert_eq!(payload.timestamp_interval(), 160);

        let bytes = payload.to_bytes();
        assert_eq!(bytes.len(), 12 + 160);
        assert_eq!(bytes[0], 0x80);
        assert_eq!(bytes[1], 0x80);
        assert!(bytes[12..].iter().all(|&b| b == PCMU_SILENCE));
    }

    #[test]
    fn test_media_replaces_silence() {
        let mut payload = PcmuPayload::new(20).unwrap();
        payload.set_media(vec![1u8, 2, 3]);
        assert_eq!(&payload.payload()[..], &[1, 2, 3]);
    }

    #[test]
    fn test_rejects_bad_ptime() {
        assert_eq!(PcmuPayload::new(0).unwrap_err(), RtpError::InvalidPtime(0));
        assert_eq!(PcmuPayload::new(30).unwrap().timestamp_interval(), 240);
        assert_eq!(PcmuPayload::new(10).unwrap().timestamp_interval(), 80);
    }
}
