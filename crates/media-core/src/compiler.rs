//! Media timeline compiler
//!
//! Walks a [`MediaScript`] once, in order, and emits one capture record per
//! RTP frame. All stream state lives in a [`StreamState`] created per call, so
//! a single compiler can serve concurrent compilations.

use std::path::Path;
use std::time::Duration;

use sipcap_codec_core::{AudioCodec, G711Codec};
use sipcap_rtp_core::{DtmfPayload, PayloadGenerator, PcmuPayload, RtpSequenceNumber, RtpSsrc, RtpTimestamp};
use tracing::{debug, info, info_span, trace, warn};

use crate::capture::{Capture, CaptureWriter};
use crate::clock::{CaptureClock, RandomSsrc, SsrcSource, SystemClock};
use crate::config::MediaConfig;
use crate::error::Result;
use crate::framer::PacketFramer;
use crate::script::{Instruction, MediaScript};
use crate::source::{SampleSource, SampleSourceOpener, WavFileOpener};

const MICROS_PER_SECOND: u64 = 1_000_000;
const MICROS_PER_MILLI: u64 = 1_000;

/// Per-compilation RTP stream state
#[derive(Debug)]
struct StreamState {
    sequence_number: RtpSequenceNumber,
    timestamp: RtpTimestamp,
    elapsed_ms: u64,
    ssrc: RtpSsrc,
    marker_sent: bool,
    start: Duration,
    packets: u64,
}

impl StreamState {
    fn new(start: Duration, ssrc: RtpSsrc) -> Self {
        Self {
            sequence_number: 0,
            timestamp: 0,
            elapsed_ms: 0,
            ssrc,
            marker_sent: false,
            start,
            packets: 0,
        }
    }

    /// Advance the stream by one frame of `generator` and stamp its header
    fn advance(&mut self, generator: &mut dyn PayloadGenerator) {
        if !self.marker_sent {
            generator.set_marker(true);
            self.marker_sent = true;
        }
        self.timestamp = self.timestamp.wrapping_add(generator.timestamp_interval());
        generator.set_timestamp(self.timestamp);
        self.elapsed_ms += generator.ptime() as u64;
        self.sequence_number = self.sequence_number.wrapping_add(1);
        generator.set_sequence_number(self.sequence_number);
        generator.set_ssrc(self.ssrc);
    }

    /// Capture time of the frame most recently advanced
    ///
    /// Sub-second precision of the start time is discarded; the offset within
    /// the second comes from elapsed media time alone.
    fn capture_time(&self) -> (u32, u32) {
        let distance = self.elapsed_ms * MICROS_PER_MILLI;
        let seconds = self.start.as_secs() + distance / MICROS_PER_SECOND;
        (seconds as u32, (distance % MICROS_PER_SECOND) as u32)
    }
}

/// Compiles media scripts into packet captures
pub struct TimelineCompiler {
    config: MediaConfig,
    framer: PacketFramer,
    codec: Box<dyn AudioCodec>,
    clock: Box<dyn CaptureClock>,
    ssrc_source: Box<dyn SsrcSource>,
    opener: Box<dyn SampleSourceOpener>,
}

impl TimelineCompiler {
    /// Create a compiler with production collaborators: system clock, random
    /// SSRC, G.711 μ-law, and WAV files from disk
    pub fn new(config: MediaConfig) -> Result<Self> {
        config.validate()?;
        let framer = PacketFramer::new(
            config.endpoints.source,
            config.endpoints.destination,
            config.capture.ttl,
        );
        Ok(Self {
            config,
            framer,
            codec: Box::new(G711Codec::pcmu()),
            clock: Box::new(SystemClock),
            ssrc_source: Box::new(RandomSsrc),
            opener: Box::new(WavFileOpener),
        })
    }

    pub fn with_clock(mut self, clock: impl CaptureClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ssrc_source(mut self, source: impl SsrcSource + 'static) -> Self {
        self.ssrc_source = Box::new(source);
        self
    }

    pub fn with_codec(mut self, codec: impl AudioCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn with_sample_opener(mut self, opener: impl SampleSourceOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Compile `script` into a capture
    ///
    /// Any failure aborts the whole compilation; no partial capture is
    /// returned.
    pub fn compile(&self, script: &MediaScript) -> Result<Capture> {
        let start = self.clock.now();
        let mut state = StreamState::new(start, self.ssrc_source.next_ssrc());
        let mut writer = CaptureWriter::new(self.config.capture.snaplen);

        let span = info_span!("compile", ssrc = state.ssrc, steps = script.len());
        let _guard = span.enter();

        for step in script.steps() {
            match step.instruction() {
                Some(Instruction::Silence { duration_ms }) => {
                    self.silence(duration_ms, &mut state, &mut writer)?;
                }
                Some(Instruction::Dtmf { event }) => {
                    let mut frame = DtmfPayload::with_payload_type(event, self.config.dtmf.payload_type);
                    frame.set_volume(self.config.dtmf.volume);
                    self.dtmf(frame, &mut state, &mut writer)?;
                }
                Some(Instruction::Play { path }) => {
                    self.play(path, &mut state, &mut writer)?;
                }
                None => warn!(step = %step, "skipping step with unusable value"),
            }
        }

        info!(
            packets = writer.len(),
            elapsed_ms = state.elapsed_ms,
            "compiled media script"
        );
        Ok(writer.finish())
    }

    fn audio_generator(&self) -> Result<PcmuPayload> {
        Ok(PcmuPayload::with_payload_type(
            self.config.audio.ptime_ms,
            self.config.audio.payload_type,
        )?)
    }

    fn emit(&self, generator: &dyn PayloadGenerator, state: &mut StreamState, writer: &mut CaptureWriter) -> Result<()> {
        let packet = self.framer.frame(state.packets as u16, &generator.to_bytes())?;
        let (seconds, micros) = state.capture_time();
        trace!(
            seq = state.sequence_number,
            ts = state.timestamp,
            marker = generator.header().marker,
            "rtp frame"
        );
        writer.push(seconds, micros, packet);
        state.packets += 1;
        Ok(())
    }

    fn silence(&self, duration_ms: u64, state: &mut StreamState, writer: &mut CaptureWriter) -> Result<()> {
        let ptime = self.config.audio.ptime_ms as u64;
        let frames = duration_ms / ptime;
        debug!(duration_ms, frames, "silence");

        for _ in 0..frames {
            let mut generator = self.audio_generator()?;
            state.advance(&mut generator);
            self.emit(&generator, state, writer)?;
        }
        Ok(())
    }

    fn dtmf(&self, template: DtmfPayload, state: &mut StreamState, writer: &mut CaptureWriter) -> Result<()> {
        let frames = self.config.dtmf.duration_ms / template.ptime();
        let interval = template.timestamp_interval();
        debug!(digit = %template.event().to_char(), frames, "dtmf");

        for i in 0..frames {
            let mut frame = template.clone();
            frame.set_end_of_event(i == frames - 1);
            let covered = (i + 1).saturating_mul(interval);
            frame.set_duration(covered.min(u16::MAX as u32) as u16);
            state.advance(&mut frame);
            self.emit(&frame, state, writer)?;
        }

        // Leave a gap matching the event's real duration before media resumes
        state.timestamp = state.timestamp.wrapping_add(frames.wrapping_mul(interval));
        Ok(())
    }

    fn play(&self, path: &Path, state: &mut StreamState, writer: &mut CaptureWriter) -> Result<()> {
        // Dropped on every return path, closing the file
        let mut source = self.opener.open(path)?;

        let ptime = self.config.audio.ptime_ms as u64;
        let frames = source.duration_ms() / ptime;
        let chunk = (source.sample_rate() as u64 * ptime / 1000) as usize;
        debug!(path = %path.display(), frames, chunk, "play");

        for _ in 0..frames {
            let samples = source.read_chunk(chunk)?;
            let encoded = self.codec.encode(&samples)?;
            let mut generator = self.audio_generator()?;
            generator.set_media(encoded);
            state.advance(&mut generator);
            self.emit(&generator, state, writer)?;
        }
        Ok(())
    }
}
