//! Shared helpers for media-core integration tests

#![allow(dead_code)]

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use sipcap_media_core::{Capture, FixedClock, FixedSsrc, MediaConfig, TimelineCompiler};
use sipcap_rtp_core::RtpFrame;

pub const START_SECS: u64 = 1_700_000_000;
pub const SSRC: u32 = 0x1234_5678;

/// Compiler with pinned clock and SSRC
pub fn pinned_compiler(config: MediaConfig) -> TimelineCompiler {
    TimelineCompiler::new(config)
        .unwrap()
        .with_clock(FixedClock::from_secs(START_SECS))
        .with_ssrc_source(FixedSsrc(SSRC))
}

/// Decode the RTP frame inside every IPv4/UDP record
pub fn rtp_frames(capture: &Capture) -> Vec<RtpFrame> {
    capture
        .records()
        .iter()
        .map(|record| RtpFrame::parse(&record.data[28..]).unwrap())
        .collect()
}

/// Write a mono 16-bit 8kHz WAV of `samples` samples
pub fn write_tone(path: &Path, samples: usize) {
    write_wav(path, 1, 8000, samples);
}

pub fn write_wav(path: &Path, channels: u16, sample_rate: u32, samples: usize) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..samples * channels as usize {
        let phase = (i % 16) as f32 / 16.0 * std::f32::consts::TAU;
        writer.write_sample((phase.sin() * 8000.0) as i16).unwrap();
    }
    writer.finalize().unwrap();
}
