//! # Media-Core: RTP Capture Synthesis
//!
//! Turns a declarative [`MediaScript`] ("send 500ms of silence", "press 5",
//! "play greeting.wav") into a packet capture of the RTP stream a SIP user
//! agent would have sent. The output is a legacy-format capture file of raw
//! IPv4/UDP/RTP packets that packet analyzers and load-testing tools can
//! replay or inspect.
//!
//! ```rust,no_run
//! use sipcap_media_core::{MediaConfig, MediaScript, TimelineCompiler};
//!
//! let mut script = MediaScript::new();
//! script.append("silence:500")?;
//! script.append("dtmf:5")?;
//! script.append("play:/tmp/greeting.wav")?;
//!
//! let compiler = TimelineCompiler::new(MediaConfig::default())?;
//! let capture = compiler.compile(&script)?;
//! capture.save("/tmp/call.pcap")?;
//! # Ok::<(), sipcap_media_core::MediaError>(())
//! ```

pub mod capture;
pub mod clock;
pub mod compiler;
pub mod config;
pub mod error;
pub mod framer;
pub mod logging;
pub mod script;
pub mod source;

pub use capture::{Capture, CaptureHeader, CaptureReader, CaptureRecord, CaptureWriter};
pub use clock::{CaptureClock, FixedClock, FixedSsrc, RandomSsrc, SsrcSource, SystemClock};
pub use compiler::TimelineCompiler;
pub use config::{MediaConfig, MediaConfigBuilder};
pub use error::{MediaError, Result};
pub use framer::PacketFramer;
pub use script::{Instruction, MediaScript, Step, StepAction};
pub use source::{SampleSource, SampleSourceOpener, WavFileOpener, WavSampleSource};
