use bytes::{BufMut, Bytes, BytesMut};

use super::PayloadGenerator;
use crate::error::RtpError;
use crate::packet::RtpHeader;
use crate::time::{clock_rates, samples_per_frame};
use crate::Result;

/// Dynamic payload type conventionally negotiated for telephone-event
pub const DTMF_PAYLOAD_TYPE: u8 = 101;

/// Timestamp units covered by one 20ms telephone-event frame
pub const DTMF_TIMESTAMP_INTERVAL: u32 = 160;

/// RFC 4733 Section 3.2 event codes for DTMF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtmfEvent {
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Star,
    Pound,
    A,
    B,
    C,
    D,
}

impl DtmfEvent {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Digit0),
            '1' => Some(Self::Digit1),
            '2' => Some(Self::Digit2),
            '3' => Some(Self::Digit3),
            '4' => Some(Self::Digit4),
            '5' => Some(Self::Digit5),
            '6' => Some(Self::Digit6),
            '7' => Some(Self::Digit7),
            '8' => Some(Self::Digit8),
            '9' => Some(Self::Digit9),
            '*' => Some(Self::Star),
            '#' => Some(Self::Pound),
            'A' | 'a' => Some(Self::A),
            'B' | 'b' => Some(Self::B),
            'C' | 'c' => Some(Self::C),
            'D' | 'd' => Some(Self::D),
            _ => None,
        }
    }

    /// Parse a single-symbol digit string
    pub fn parse(value: &str) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| RtpError::InvalidDigit(value.to_string())),
            _ => Err(RtpError::InvalidDigit(value.to_string())),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Digit0 => '0',
            Self::Digit1 => '1',
            Self::Digit2 => '2',
            Self::Digit3 => '3',
            Self::Digit4 => '4',
            Self::Digit5 => '5',
            Self::Digit6 => '6',
            Self::Digit7 => '7',
            Self::Digit8 => '8',
            Self::Digit9 => '9',
            Self::Star => '*',
            Self::Pound => '#',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Wire event code
    pub fn code(self) -> u8 {
        match self {
            Self::Digit0 => 0,
            Self::Digit1 => 1,
            Self::Digit2 => 2,
            Self::Digit3 => 3,
            Self::Digit4 => 4,
            Self::Digit5 => 5,
            Self::Digit6 => 6,
            Self::Digit7 => 7,
            Self::Digit8 => 8,
            Self::Digit9 => 9,
            Self::Star => 10,
            Self::Pound => 11,
            Self::A => 12,
            Self::B => 13,
            Self::C => 14,
            Self::D => 15,
        }
    }
}

/// RFC 4733 telephone-event frame generator
///
/// Body layout (4 bytes):
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     event     |E|R| volume    |          duration             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone)]
pub struct DtmfPayload {
    header: RtpHeader,
    ptime: u32,
    event: DtmfEvent,
    end_of_event: bool,
    volume: u8,
    duration: u16,
}

impl DtmfPayload {
    /// Default packetization interval in milliseconds
    pub const PTIME: u32 = 20;

    /// Recommended power level, expressed as -dBm0
    pub const DEFAULT_VOLUME: u8 = 10;

    /// Create a frame for `event` with the default payload type
    pub fn new(event: DtmfEvent) -> Self {
        Self::with_payload_type(event, DTMF_PAYLOAD_TYPE)
    }

    /// Create a frame for `event` with a negotiated payload type
    pub fn with_payload_type(event: DtmfEvent, payload_type: u8) -> Self {
        Self {
            header: RtpHeader::new(payload_type),
            ptime: Self::PTIME,
            event,
            end_of_event: false,
            volume: Self::DEFAULT_VOLUME,
            duration: 0,
        }
    }

    pub fn event(&self) -> DtmfEvent {
        self.event
    }

    pub fn end_of_event(&self) -> bool {
        self.end_of_event
    }

    /// Mark this frame as the final one for the event
    pub fn set_end_of_event(&mut self, end: bool) {
        self.end_of_event = end;
    }

    /// Volume is a 6-bit field; larger values are clamped
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(0x3F);
    }

    /// Event duration so far, in timestamp units
    pub fn set_duration(&mut self, duration: u16) {
        self.duration = duration;
    }
}

impl PayloadGenerator for DtmfPayload {
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
        let mut buf = BytesMut::with_capacity(4);
        buf.put_u8(self.event.code());
        buf.put_u8(((self.end_of_event as u8) << 7) | (self.volume & 0x3F));
        buf.put_u16(self.duration);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes() {
        let symbols = "0123456789*#ABCD";
        for (code, symbol) in symbols.chars().enumerate() {
            let event = DtmfEvent::from_char(symbol).unwrap();
            assert_eq!(event.code() as usize, code);
            assert_eq!(event.to_char(), symbol);
        }
        assert_eq!(DtmfEvent::parse("d").unwrap(), DtmfEvent::D);
        assert!(DtmfEvent::parse("").is_err());
        assert!(DtmfEvent::parse("12").is_err());
        assert_eq!(DtmfEvent::parse("x"), Err(RtpError::InvalidDigit("x".into())));
    }

    #[test]
    fn test_body_layout() {
        let mut frame = DtmfPayload::new(DtmfEvent::Pound);
        frame.set_duration(1600);
        assert_eq!(&frame.payload()[..], &[11, 10, 0x06, 0x40]);

        frame.set_end_of_event(true);
        frame.set_volume(0xFF);
        assert_eq!(&frame.payload()[..], &[11, 0x80 | 0x3F, 0x06, 0x40]);
    }

    #[test]
    fn test_frame_header() {
        let mut frame = DtmfPayload::new(DtmfEvent::Digit5);
        frame.set_marker(true);
        frame.set_sequence_number(3);
        let bytes = frame.to_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[1], 0x80 | DTMF_PAYLOAD_TYPE);
        assert_eq!(frame.timestamp_interval(), DTMF_TIMESTAMP_INTERVAL);
        assert_eq!(frame.ptime(), 20);
    }
}
