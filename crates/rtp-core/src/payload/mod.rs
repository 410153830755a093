//! Payload generators
//!
//! A generator produces one RTP frame's header and body. The compiler drives
//! both variants through [`PayloadGenerator`], so stream bookkeeping is written
//! once regardless of what the frame carries.

mod dtmf;
mod pcmu;

pub use dtmf::{DtmfEvent, DtmfPayload, DTMF_PAYLOAD_TYPE, DTMF_TIMESTAMP_INTERVAL};
pub use pcmu::{PcmuPayload, PCMU_PAYLOAD_TYPE, PCMU_SILENCE};

use bytes::Bytes;

use crate::packet::{RtpFrame, RtpHeader};
use crate::{RtpSequenceNumber, RtpSsrc, RtpTimestamp};

/// Capability set shared by every payload variant
pub trait PayloadGenerator {
    /// Milliseconds of media carried by one frame
    fn ptime(&self) -> u32;

    /// RTP timestamp units the stream advances per frame
    fn timestamp_interval(&self) -> u32;

    /// Header fields for the next frame
    fn header(&self) -> &RtpHeader;

    /// Mutable header access for stream bookkeeping
    fn header_mut(&mut self) -> &mut RtpHeader;

    /// Encoded payload body
    fn payload(&self) -> Bytes;

    /// Set the marker bit
    fn set_marker(&mut self, marker: bool) {
        self.header_mut().marker = marker;
    }

    /// Set the sequence number
    fn set_sequence_number(&mut self, sequence_number: RtpSequenceNumber) {
        self.header_mut().sequence_number = sequence_number;
    }

    /// Set the media timestamp
    fn set_timestamp(&mut self, timestamp: RtpTimestamp) {
        self.header_mut().timestamp = timestamp;
    }

    /// Set the synchronization source
    fn set_ssrc(&mut self, ssrc: RtpSsrc) {
        self.header_mut().ssrc = ssrc;
    }

    /// Assemble the frame
    fn to_frame(&self) -> RtpFrame {
        RtpFrame::new(*self.header(), self.payload())
    }

    /// Serialize header and body
    fn to_bytes(&self) -> Bytes {
        self.to_frame().serialize()
    }
}
