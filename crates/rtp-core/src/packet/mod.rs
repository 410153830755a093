//! RTP frame layout

mod header;
mod rtp;

pub use header::{RtpHeader, RTP_HEADER_SIZE, RTP_VERSION};
pub use rtp::RtpFrame;
