use bytes::{Buf, Bytes, BytesMut};

use super::header::{RtpHeader, RTP_HEADER_SIZE};
use crate::Result;

/// A complete RTP frame: header plus opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpFrame {
    /// Frame header
    pub header: RtpHeader,
    /// Payload bytes
    pub payload: Bytes,
}

impl RtpFrame {
    /// Create a frame from a header and payload
    pub fn new(header: RtpHeader, payload: impl Into<Bytes>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    /// Serialized size in bytes
    pub fn size(&self) -> usize {
        RTP_HEADER_SIZE + self.payload.len()
    }

    /// Serialize header and payload
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.size());
        self.header.serialize(&mut buf);
        buf.extend_from_slice(&self.payload);
        buf.freeze()
    }

    /// Parse a frame from raw bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut buf = data;
        let header = RtpHeader::parse(&mut buf)?;
        let payload = Bytes::copy_from_slice(buf.chunk());
        Ok(Self { header, payload })
    }
}
