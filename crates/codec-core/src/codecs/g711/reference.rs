//! G.711 μ-law reference algorithm
//!
//! Bit-exact with the ITU-T Software Tools Library G.711 module: the input is
//! reduced to its 14 most significant bits, biased by 33, segmented, and
//! emitted as a one's-complemented sign/segment/mantissa byte.

/// Compress one 16-bit linear sample to μ-law
pub fn ulaw_compress(sample: i16) -> u8 {
    // One's complement for negatives keeps -32768 in range
    let magnitude = if sample < 0 {
        (((!sample) as u16) >> 2) as i16 + 33
    } else {
        (sample >> 2) + 33
    };
    let magnitude = magnitude.min(0x1FFF);

    let mut segment = 1;
    let mut rest = magnitude >> 6;
    while rest != 0 {
        segment += 1;
        rest >>= 1;
    }

    let high_nibble = 0x0008 - segment;
    let low_nibble = 0x000F - ((magnitude >> segment) & 0x000F);
    let mut encoded = (high_nibble << 4) | low_nibble;
    if sample >= 0 {
        encoded |= 0x0080;
    }
    encoded as u8
}

/// Expand one μ-law byte back to 16-bit linear
pub fn ulaw_expand(encoded: u8) -> i16 {
    let sign = if encoded < 0x80 { -1 } else { 1 };
    let inverted = (!encoded) as i16;
    let exponent = (inverted >> 4) & 0x0007;
    let mantissa = inverted & 0x000F;
    let step = 4 << (exponent + 1);

    sign * ((0x0080 << exponent) + step * mantissa + step / 2 - 4 * 33)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(ulaw_compress(0), 0xff);
        assert_eq!(ulaw_compress(128), 0xef);
        assert_eq!(ulaw_compress(1024), 0xcd);
        assert_eq!(ulaw_compress(-128), 0x6f);
        assert_eq!(ulaw_compress(-1024), 0x4d);

        assert_eq!(ulaw_expand(0xff), 0);
        assert_eq!(ulaw_expand(0xef), 132);
        assert_eq!(ulaw_expand(0xcd), 1052);
        assert_eq!(ulaw_expand(0x6f), -132);
        assert_eq!(ulaw_expand(0x4d), -1052);
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        let low = ulaw_compress(i16::MIN);
        let high = ulaw_compress(i16::MAX);
        assert_eq!(low & 0x80, 0);
        assert_eq!(high & 0x80, 0x80);
        assert!(ulaw_expand(low) < -30000);
        assert!(ulaw_expand(high) > 30000);
    }

    #[test]
    fn test_quantization_error_is_bounded() {
        for sample in [0i16, 100, -100, 1000, -1000, 10000, -10000] {
            let error = (ulaw_expand(ulaw_compress(sample)) as i32 - sample as i32).abs();
            assert!(error < 2000, "μ-law error too large for {}: {}", sample, error);
        }
    }
}
