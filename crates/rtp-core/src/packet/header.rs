use bytes::{Buf, BufMut, BytesMut};

use crate::error::RtpError;
use crate::{Result, RtpSequenceNumber, RtpSsrc, RtpTimestamp};

/// RTP protocol version
pub const RTP_VERSION: u8 = 2;

/// Size of the fixed RTP header without CSRCs or extensions
pub const RTP_HEADER_SIZE: usize = 12;

/// Fixed RTP header (RFC 3550 Section 5.1)
///
/// Generated streams never carry CSRCs, padding, or header extensions, so
/// only the fields that vary are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    /// Version, always 2 for generated frames
    pub version: u8,
    /// Marker bit
    pub marker: bool,
    /// Payload type (7 bits)
    pub payload_type: u8,
    /// Sequence number
    pub sequence_number: RtpSequenceNumber,
    /// Media timestamp
    pub timestamp: RtpTimestamp,
    /// Synchronization source
    pub ssrc: RtpSsrc,
}

impl RtpHeader {
    /// Create a header for the given payload type with zeroed stream fields
    pub fn new(payload_type: u8) -> Self {
        Self {
            version: RTP_VERSION,
            marker: false,
            payload_type,
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0,
        }
    }

    /// Serialize the header into `buf`
    pub fn serialize(&self, buf: &mut BytesMut) {
        buf.reserve(RTP_HEADER_SIZE);
        // V(2) P(1) X(1) CC(4)
        buf.put_u8((self.version & 0x03) << 6);
        // M(1) PT(7)
        buf.put_u8(((self.marker as u8) << 7) | (self.payload_type & 0x7F));
        buf.put_u16(self.sequence_number);
        buf.put_u32(self.timestamp);
        buf.put_u32(self.ssrc);
    }

    /// Parse a header, skipping any CSRC list
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        if buf.remaining() < RTP_HEADER_SIZE {
            return Err(RtpError::BufferTooSmall {
                required: RTP_HEADER_SIZE,
                available: buf.remaining(),
            });
        }

        let first = buf.get_u8();
        let version = first >> 6;
        if version != RTP_VERSION {
            return Err(RtpError::InvalidPacket(format!("unsupported version {}", version)));
        }
        let csrc_count = (first & 0x0F) as usize;

        let second = buf.get_u8();
        let header = Self {
            version,
            marker: second & 0x80 != 0,
            payload_type: second & 0x7F,
            sequence_number: buf.get_u16(),
            timestamp: buf.get_u32(),
            ssrc: buf.get_u32(),
        };

        if buf.remaining() < csrc_count * 4 {
            return Err(RtpError::BufferTooSmall {
                required: csrc_count * 4,
                available: buf.remaining(),
            });
        }
        buf.advance(csrc_count * 4);

        Ok(header)
    }
}
