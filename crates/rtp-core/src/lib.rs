//! RTP frame model and payload generators
//!
//! This crate knows how to lay out an RTP frame (RFC 3550) and how to fill one
//! with either a PCMU audio payload or an RFC 4733 telephone-event. Stream
//! bookkeeping (sequence numbers, timestamps, marker emission) belongs to the
//! caller; generators only carry the header fields they are handed.

pub mod error;
pub mod packet;
pub mod payload;
pub mod time;

pub use error::{RtpError, Result};
pub use packet::{RtpFrame, RtpHeader, RTP_HEADER_SIZE, RTP_VERSION};
pub use payload::{
    DtmfEvent, DtmfPayload, PayloadGenerator, PcmuPayload, DTMF_PAYLOAD_TYPE,
    PCMU_PAYLOAD_TYPE,
};

/// RTP sequence number
pub type RtpSequenceNumber = u16;

/// RTP timestamp
pub type RtpTimestamp = u32;

/// RTP synchronization source identifier
pub type RtpSsrc = u32;
