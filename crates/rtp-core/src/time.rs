//! RTP clock helpers

use std::time::Duration;

/// Typical clock rates for narrowband telephony payloads
pub mod clock_rates {
    /// G.711 and RFC 4733 telephone-event (8kHz)
    pub const AUDIO_8KHZ: u32 = 8000;
}

/// Convert a duration to RTP timestamp units at a given clock rate
pub fn duration_to_rtp_timestamp(duration: Duration, clock_rate: u32) -> u32 {
    let seconds = duration.as_secs() * clock_rate as u64;
    let fraction = (duration.subsec_nanos() as u64 * clock_rate as u64) / 1_000_000_000;
    (seconds + fraction) as u32
}

/// RTP timestamp units covered by one packetization interval
pub fn samples_per_frame(clock_rate: u32, ptime_ms: u32) -> u32 {
    duration_to_rtp_timestamp(Duration::from_millis(ptime_ms as u64), clock_rate)
}
