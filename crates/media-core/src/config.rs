//! Compiler configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```toml
//! [endpoints]
//! source = "10.0.0.1:6000"
//! destination = "10.0.0.2:7000"
//!
//! [audio]
//! ptime_ms = 30
//! ```

use std::net::{Ipv4Addr, SocketAddrV4};

use serde::{Deserialize, Serialize};
use sipcap_rtp_core::{DtmfPayload, DTMF_PAYLOAD_TYPE, PCMU_PAYLOAD_TYPE, RTP_HEADER_SIZE};

use crate::error::{MediaError, Result};
use crate::framer::{IPV4_HEADER_SIZE, UDP_HEADER_SIZE};
use crate::source::REQUIRED_SAMPLE_RATE;

/// Records are never truncated, so the capture must admit any IPv4 packet
pub const MIN_SNAPLEN: u32 = u16::MAX as u32;

/// Longest packetization interval whose PCMU packet still fits in IPv4
pub const MAX_PTIME_MS: u32 = ((u16::MAX as usize - IPV4_HEADER_SIZE - UDP_HEADER_SIZE - RTP_HEADER_SIZE)
    / (REQUIRED_SAMPLE_RATE as usize / 1000)) as u32;

/// Complete compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Fixed addressing for every generated packet
    pub endpoints: EndpointConfig,
    /// Audio generator settings
    pub audio: AudioConfig,
    /// Telephone-event settings
    pub dtmf: DtmfConfig,
    /// Capture file and IP header settings
    pub capture: CaptureConfig,
}

/// Source and destination of the simulated RTP flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub source: SocketAddrV4,
    pub destination: SocketAddrV4,
}

/// PCMU generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Packetization interval in milliseconds
    pub ptime_ms: u32,
    pub payload_type: u8,
}

/// RFC 4733 generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtmfConfig {
    pub payload_type: u8,
    /// Total length of one digit event in milliseconds
    pub duration_ms: u32,
    /// Power level in -dBm0 (0..=63)
    pub volume: u8,
}

/// Capture header and IP settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub snaplen: u32,
    pub ttl: u8,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            source: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 16384),
            destination: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 16386),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ptime_ms: 20,
            payload_type: PCMU_PAYLOAD_TYPE,
        }
    }
}

impl Default for DtmfConfig {
    fn default() -> Self {
        Self {
            payload_type: DTMF_PAYLOAD_TYPE,
            duration_ms: 200,
            volume: DtmfPayload::DEFAULT_VOLUME,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: 65535,
            ttl: 32,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            audio: AudioConfig::default(),
            dtmf: DtmfConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl MediaConfig {
    /// Start a builder from the defaults
    pub fn builder() -> MediaConfigBuilder {
        MediaConfigBuilder::new()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).map_err(|e| MediaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the compiler relies on
    pub fn validate(&self) -> Result<()> {
        if self.audio.ptime_ms == 0 {
            return Err(MediaError::Config("audio.ptime_ms must be non-zero".into()));
        }
        if self.audio.ptime_ms > MAX_PTIME_MS {
            return Err(MediaError::Config(format!(
                "audio.ptime_ms {} exceeds {}, packets would not fit in IPv4",
                self.audio.ptime_ms, MAX_PTIME_MS
            )));
        }
        if self.dtmf.duration_ms < DtmfPayload::PTIME {
            return Err(MediaError::Config(format!(
                "dtmf.duration_ms must cover at least one {}ms frame, got {}",
                DtmfPayload::PTIME,
                self.dtmf.duration_ms
            )));
        }
        for (name, pt) in [("audio", self.audio.payload_type), ("dtmf", self.dtmf.payload_type)] {
            if pt > 127 {
                return Err(MediaError::Config(format!("{}.payload_type {} exceeds 7 bits", name, pt)));
            }
        }
        if self.audio.payload_type == self.dtmf.payload_type {
            return Err(MediaError::Config(format!(
                "audio and dtmf share payload type {}",
                self.audio.payload_type
            )));
        }
        if self.dtmf.volume > 63 {
            return Err(MediaError::Config(format!("dtmf.volume {} exceeds 63", self.dtmf.volume)));
        }
        if self.capture.snaplen < MIN_SNAPLEN {
            return Err(MediaError::Config(format!(
                "capture.snaplen {} is below {}",
                self.capture.snaplen, MIN_SNAPLEN
            )));
        }
        Ok(())
    }
}

/// Builder for [`MediaConfig`]
#[derive(Debug, Clone)]
pub struct MediaConfigBuilder {
    config: MediaConfig,
}

impl MediaConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MediaConfig::default(),
        }
    }

    /// Set the sending endpoint
    pub fn source(mut self, addr: SocketAddrV4) -> Self {
        self.config.endpoints.source = addr;
        self
    }

    /// Set the receiving endpoint
    pub fn destination(mut self, addr: SocketAddrV4) -> Self {
        self.config.endpoints.destination = addr;
        self
    }

    /// Set the audio packetization interval
    pub fn ptime_ms(mut self, ptime: u32) -> Self {
        self.config.audio.ptime_ms = ptime;
        self
    }

    pub fn audio_payload_type(mut self, pt: u8) -> Self {
        self.config.audio.payload_type = pt;
        self
    }

    pub fn dtmf_payload_type(mut self, pt: u8) -> Self {
        self.config.dtmf.payload_type = pt;
        self
    }

    pub fn dtmf_duration_ms(mut self, duration: u32) -> Self {
        self.config.dtmf.duration_ms = duration;
        self
    }

    pub fn dtmf_volume(mut self, volume: u8) -> Self {
        self.config.dtmf.volume = volume;
        self
    }

    pub fn snaplen(mut self, snaplen: u32) -> Self {
        self.config.capture.snaplen = snaplen;
        self
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.config.capture.ttl = ttl;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<MediaConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for MediaConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
