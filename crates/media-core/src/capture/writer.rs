use bytes::Bytes;
use tracing::trace;

use super::{Capture, CaptureHeader, CaptureRecord};

/// Accumulates packets into a [`Capture`]
#[derive(Debug)]
pub struct CaptureWriter {
    header: CaptureHeader,
    records: Vec<CaptureRecord>,
}

impl CaptureWriter {
    pub fn new(snaplen: u32) -> Self {
        Self {
            header: CaptureHeader::new(snaplen),
            records: Vec::new(),
        }
    }

    /// Append one packet captured at `seconds` + `micros`
    pub fn push(&mut self, seconds: u32, micros: u32, packet: Bytes) {
        trace!(seconds, micros, len = packet.len(), "capture record");
        self.records.push(CaptureRecord::new(seconds, micros, packet));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seal the capture
    pub fn finish(self) -> Capture {
        Capture::from_parts(self.header, self.records)
    }
}
