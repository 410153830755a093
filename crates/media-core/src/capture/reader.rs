use bytes::{Buf, Bytes};

use super::{Capture, CaptureHeader, CaptureRecord, CAPTURE_MAGIC, GLOBAL_HEADER_SIZE, RECORD_HEADER_SIZE};
use crate::error::{MediaError, Result};

/// Decoder for legacy capture files in either byte order
pub struct CaptureReader;

struct Fields<'a> {
    buf: &'a [u8],
    swapped: bool,
}

impl Fields<'_> {
    fn u16(&mut self) -> u16 {
        if self.swapped {
            self.buf.get_u16()
        } else {
            self.buf.get_u16_le()
        }
    }

    fn u32(&mut self) -> u32 {
        if self.swapped {
            self.buf.get_u32()
        } else {
            self.buf.get_u32_le()
        }
    }
}

impl CaptureReader {
    /// Parse a complete capture file
    pub fn parse(data: &[u8]) -> Result<Capture> {
        if data.len() < GLOBAL_HEADER_SIZE {
            return Err(MediaError::MalformedCapture(format!(
                "global header needs {} bytes, have {}",
                GLOBAL_HEADER_SIZE,
                data.len()
            )));
        }

        let swapped = match u32::from_le_bytes([data[0], data[1], data[2], data[3]]) {
            CAPTURE_MAGIC => false,
            magic if magic.swap_bytes() == CAPTURE_MAGIC => true,
            magic => return Err(MediaError::MalformedCapture(format!("bad magic {:#010x}", magic))),
        };

        let mut fields = Fields { buf: &data[4..], swapped };
        let header = CaptureHeader {
            magic: CAPTURE_MAGIC,
            version_major: fields.u16(),
            version_minor: fields.u16(),
            thiszone: fields.u32() as i32,
            sigfigs: fields.u32(),
            snaplen: fields.u32(),
            link_type: fields.u32(),
        };

        let mut records = Vec::new();
        while fields.buf.has_remaining() {
            if fields.buf.remaining() < RECORD_HEADER_SIZE {
                return Err(MediaError::MalformedCapture(format!(
                    "truncated record header at record {}",
                    records.len()
                )));
            }
            let timestamp_seconds = fields.u32();
            let timestamp_micros = fields.u32();
            let captured_length = fields.u32();
            let original_length = fields.u32();

            let len = captured_length as usize;
            if fields.buf.remaining() < len {
                return Err(MediaError::MalformedCapture(format!(
                    "record {} claims {} bytes, {} remain",
                    records.len(),
                    len,
                    fields.buf.remaining()
                )));
            }
            let packet = Bytes::copy_from_slice(&fields.buf[..len]);
            fields.buf.advance(len);

            records.push(CaptureRecord {
                timestamp_seconds,
                timestamp_micros,
                captured_length,
                original_length,
                data: packet,
            });
        }

        Ok(Capture::from_parts(header, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_input() {
        assert!(CaptureReader::parse(&[0u8; 10]).is_err());
        assert!(CaptureReader::parse(&[0u8; 24]).is_err());

        let mut truncated = crate::capture::CaptureWriter::new(65535);
        truncated.push(0, 0, Bytes::from_static(&[1, 2, 3, 4]));
        let bytes = truncated.finish().to_bytes();
        assert!(CaptureReader::parse(&bytes[..bytes.len() - 1]).is_err());
        assert!(CaptureReader::parse(&bytes[..GLOBAL_HEADER_SIZE + 8]).is_err());
    }

    #[test]
    fn test_big_endian_file() {
        let mut data = Vec::new();
        data.extend_from_slice(&CAPTURE_MAGIC.to_be_bytes());
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&1500u32.to_be_bytes());
        data.extend_from_slice(&101u32.to_be_bytes());
        data.extend_from_slice(&5u32.to_be_bytes());
        data.extend_from_slice(&6u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.push(0xAB);

        let capture = CaptureReader::parse(&data).unwrap();
        assert_eq!(capture.header().snaplen, 1500);
        assert_eq!(capture.header().version_minor, 4);
        assert_eq!(capture.records()[0].timestamp_seconds, 5);
        assert_eq!(capture.records()[0].timestamp_micros, 6);
        assert_eq!(&capture.records()[0].data[..], &[0xAB]);
    }
}
