//! Legacy capture file format
//!
//! The classic (non-pcapng) layout: one 24-byte global header followed by
//! records, each a 16-byte record header and the packet bytes. All header
//! fields are written little-endian; readers detect byte order from the magic.

mod reader;
mod writer;

pub use reader::CaptureReader;
pub use writer::CaptureWriter;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MediaError, Result};

/// Microsecond-resolution magic number
pub const CAPTURE_MAGIC: u32 = 0xa1b2_c3d4;

/// Global header size in bytes
pub const GLOBAL_HEADER_SIZE: usize = 24;

/// Per-record header size in bytes
pub const RECORD_HEADER_SIZE: usize = 16;

/// Raw IPv4/IPv6 packets with no link-layer header
pub const LINKTYPE_RAW: u32 = 101;

/// File-level header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHeader {
    pub magic: u32,
    pub version_major: u16,
    pub version_minor: u16,
    /// GMT offset of timestamps, always 0
    pub thiszone: i32,
    /// Timestamp accuracy, always 0
    pub sigfigs: u32,
    pub snaplen: u32,
    pub link_type: u32,
}

impl CaptureHeader {
    pub fn new(snaplen: u32) -> Self {
        Self {
            magic: CAPTURE_MAGIC,
            version_major: 2,
            version_minor: 4,
            thiszone: 0,
            sigfigs: 0,
            snaplen,
            link_type: LINKTYPE_RAW,
        }
    }

    fn serialize(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.magic);
        buf.put_u16_le(self.version_major);
        buf.put_u16_le(self.version_minor);
        buf.put_i32_le(self.thiszone);
        buf.put_u32_le(self.sigfigs);
        buf.put_u32_le(self.snaplen);
        buf.put_u32_le(self.link_type);
    }
}

/// One captured packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp_seconds: u32,
    pub timestamp_micros: u32,
    pub captured_length: u32,
    pub original_length: u32,
    pub data: Bytes,
}

impl CaptureRecord {
    /// Record holding the whole packet, untruncated
    pub fn new(timestamp_seconds: u32, timestamp_micros: u32, data: Bytes) -> Self {
        let length = data.len() as u32;
        Self {
            timestamp_seconds,
            timestamp_micros,
            captured_length: length,
            original_length: length,
            data,
        }
    }

    /// Timestamp as total microseconds, for ordering checks
    pub fn timestamp_micros_total(&self) -> u64 {
        self.timestamp_seconds as u64 * 1_000_000 + self.timestamp_micros as u64
    }

    fn serialize(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.timestamp_seconds);
        buf.put_u32_le(self.timestamp_micros);
        buf.put_u32_le(self.captured_length);
        buf.put_u32_le(self.original_length);
        buf.put_slice(&self.data);
    }
}

/// A finished capture: global header plus ordered records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    header: CaptureHeader,
    records: Vec<CaptureRecord>,
}

impl Capture {
    pub(crate) fn from_parts(header: CaptureHeader, records: Vec<CaptureRecord>) -> Self {
        Self { header, records }
    }

    pub fn header(&self) -> &CaptureHeader {
        &self.header
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total serialized size in bytes
    pub fn byte_len(&self) -> usize {
        GLOBAL_HEADER_SIZE
            + self
                .records
                .iter()
                .map(|r| RECORD_HEADER_SIZE + r.data.len())
                .sum::<usize>()
    }

    /// Serialize the whole file
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.byte_len());
        self.header.serialize(&mut buf);
        for record in &self.records {
            record.serialize(&mut buf);
        }
        buf.freeze()
    }

    /// Stream the file to `writer`
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Write the file to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| MediaError::io(path, e))?;
        self.write_to(BufWriter::new(file)).map_err(|e| MediaError::io(path, e))
    }
}
