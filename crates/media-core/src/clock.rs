//! Injected sources of wall-clock time and SSRC identifiers

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use sipcap_rtp_core::RtpSsrc;

/// Wall-clock source sampled once at the start of each compilation
pub trait CaptureClock: Send + Sync {
    /// Time since the UNIX epoch
    fn now(&self) -> Duration;
}

/// Real system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl CaptureClock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| Duration::from_secs(0))
    }
}

/// Pinned time, for reproducible captures
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Duration);

impl FixedClock {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }
}

impl CaptureClock for FixedClock {
    fn now(&self) -> Duration {
        self.0
    }
}

/// Source of the per-compilation SSRC
pub trait SsrcSource: Send + Sync {
    fn next_ssrc(&self) -> RtpSsrc;
}

/// Uniform draw from the 31-bit SSRC space
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSsrc;

impl SsrcSource for RandomSsrc {
    fn next_ssrc(&self) -> RtpSsrc {
        rand::thread_rng().gen_range(0..1u32 << 31)
    }
}

/// Always the same SSRC
#[derive(Debug, Clone, Copy)]
pub struct FixedSsrc(pub RtpSsrc);

impl SsrcSource for FixedSsrc {
    fn next_ssrc(&self) -> RtpSsrc {
        self.0
    }
}
