//! # Codec-Core: Audio Encoding for Synthesized Media
//!
//! This crate provides the audio codec used when turning linear PCM into RTP
//! payloads. The media generator only ever speaks one encoding law, so the
//! surface is intentionally small: an [`AudioCodec`] trait and a table-driven
//! G.711 μ-law implementation.
//!
//! ## Usage
//!
//! ```rust
//! use sipcap_codec_core::{AudioCodec, G711Codec};
//!
//! let codec = G711Codec::pcmu();
//!
//! // 20ms of silence at 8kHz
//! let samples = vec![0i16; 160];
//! let encoded = codec.encode(&samples)?;
//! assert_eq!(encoded.len(), samples.len());
//! assert!(encoded.iter().all(|&b| b == 0xFF));
//! # Ok::<(), sipcap_codec_core::CodecError>(())
//! ```

#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod types;

pub use codecs::g711::{G711Codec, G711Variant};
pub use error::{CodecError, Result};
pub use types::{AudioCodec, CodecInfo};
