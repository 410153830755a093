//! G.711 lookup tables
//!
//! The μ-law encode table covers every 16-bit input (64KB) and is built from
//! the reference algorithm on first use.

use super::reference::ulaw_compress;
use std::sync::LazyLock;

static MULAW_ENCODE_TABLE: LazyLock<Box<[u8; 65536]>> = LazyLock::new(|| {
    let mut table = Box::new([0u8; 65536]);
    for (index, slot) in table.iter_mut().enumerate() {
        *slot = ulaw_compress((index as u16).wrapping_sub(32768) as i16);
    }
    tracing::trace!("built G.711 μ-law encode table");
    table
});

/// μ-law compression of a single sample through the lookup table
#[inline]
pub fn mulaw_compress_table(sample: i16) -> u8 {
    MULAW_ENCODE_TABLE[(sample as u16).wrapping_add(32768) as usize]
}

/// Table-driven μ-law compression of a slice
///
/// # Panics
///
/// Panics if the input and output slices have different lengths.
pub fn encode_mulaw_table(samples: &[i16], output: &mut [u8]) {
    assert_eq!(samples.len(), output.len(), "Input and output slices must have the same length");
    for (out, &sample) in output.iter_mut().zip(samples) {
        *out = mulaw_compress_table(sample);
    }
}
