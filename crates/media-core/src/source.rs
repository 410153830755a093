//! Linear PCM sample sources
//!
//! Playback steps read 16-bit mono 8kHz PCM in packetization-sized chunks.
//! Anything else is rejected when the source is opened.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::{MediaError, Result};

/// Required sample rate for playback audio
pub const REQUIRED_SAMPLE_RATE: u32 = 8000;

/// Sequential reader of linear PCM
///
/// Sources release their underlying handle when dropped.
pub trait SampleSource {
    /// Samples per second
    fn sample_rate(&self) -> u32;

    /// Total number of sample frames in the source
    fn total_sample_frames(&self) -> u64;

    /// Read up to `count` samples from the current position
    fn read_chunk(&mut self, count: usize) -> Result<Vec<i16>>;

    /// Playable length in whole milliseconds
    fn duration_ms(&self) -> u64 {
        match self.sample_rate() {
            0 => 0,
            rate => self.total_sample_frames() * 1000 / rate as u64,
        }
    }
}

/// Opens the source behind a `play:` step
pub trait SampleSourceOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn SampleSource>>;
}

/// WAV file reader
pub struct WavSampleSource {
    path: PathBuf,
    reader: WavReader<BufReader<File>>,
}

impl WavSampleSource {
    /// Open `path`, requiring mono 16-bit integer PCM at 8kHz
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = WavReader::open(&path).map_err(|e| MediaError::from_wav(&path, e))?;
        let spec = reader.spec();

        if spec.channels != 1
            || spec.bits_per_sample != 16
            || spec.sample_format != SampleFormat::Int
            || spec.sample_rate != REQUIRED_SAMPLE_RATE
        {
            return Err(MediaError::sample_format(
                &path,
                format!(
                    "expected mono 16-bit PCM at {}Hz, got {} channel(s) {}-bit {:?} at {}Hz",
                    REQUIRED_SAMPLE_RATE,
                    spec.channels,
                    spec.bits_per_sample,
                    spec.sample_format,
                    spec.sample_rate
                ),
            ));
        }

        debug!(path = %path.display(), frames = reader.duration(), "opened WAV source");
        Ok(Self { path, reader })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for WavSampleSource {
    fn sample_rate(&self) -> u32 {
        self.reader.spec().sample_rate
    }

    fn total_sample_frames(&self) -> u64 {
        self.reader.duration() as u64
    }

    fn read_chunk(&mut self, count: usize) -> Result<Vec<i16>> {
        let path = &self.path;
        self.reader
            .samples::<i16>()
            .take(count)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| MediaError::from_wav(path, e))
    }
}

/// Opens WAV files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct WavFileOpener;

impl SampleSourceOpener for WavFileOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn SampleSource>> {
        Ok(Box::new(WavSampleSource::open(path)?))
    }
}
