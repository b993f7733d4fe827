// Per-pixel brightness transform.
// Visual: the whole layer gets uniformly lighter or darker; alpha (and so
// the layer's silhouette) is untouched.

use crate::types::{pack, unpack, PixelBuffer};

/// Multiply R, G and B of every pixel by `factor`, clamping each channel to
/// 0..=255. Alpha passes through. Total over all inputs: a factor at or
/// below zero gives a black (but still shaped) layer, a huge factor
/// saturates to white.
///
/// Same (buffer, factor) in, same buffer out, so callers can reapply it to
/// pristine captured pixels instead of stacking it on already-adjusted ones.
pub fn adjust(src: &PixelBuffer, factor: f32) -> PixelBuffer {
    let mut out = Vec::with_capacity(src.pixels.len());
    for &px in &src.pixels {
        let (r, g, b, a) = unpack(px);
        out.push(pack(scale(r, factor), scale(g, factor), scale(b, factor), a));
    }
    PixelBuffer { width: src.width, height: src.height, pixels: out }
}

#[inline]
fn scale(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_one_is_identity() {
        let buf = PixelBuffer::filled(4, 3, pack(12, 200, 255, 0x80));
        assert_eq!(adjust(&buf, 1.0), buf);
    }

    #[test]
    fn darken_and_brighten_scale_channels() {
        let buf = PixelBuffer::filled(1, 1, pack(200, 200, 200, 0xFF));
        let (r, ..) = unpack(adjust(&buf, 0.8).pixels[0]);
        assert_eq!(r, 160);

        let (r, ..) = unpack(adjust(&buf, 1.2).pixels[0]);
        assert_eq!(r, 240); // 200 * 1.2 = 240, still in range

        let hot = PixelBuffer::filled(1, 1, pack(220, 220, 220, 0xFF));
        let (r, ..) = unpack(adjust(&hot, 1.2).pixels[0]);
        assert_eq!(r, 255); // 220 * 1.2 = 264, clamped
    }

    #[test]
    fn alpha_passes_through() {
        let buf = PixelBuffer::filled(1, 1, pack(100, 100, 100, 0x42));
        let (.., a) = unpack(adjust(&buf, 3.0).pixels[0]);
        assert_eq!(a, 0x42);
    }

    #[test]
    fn non_positive_factor_goes_black() {
        let buf = PixelBuffer::filled(2, 2, pack(9, 80, 255, 0xFF));
        for px in adjust(&buf, 0.0).pixels {
            assert_eq!(unpack(px), (0, 0, 0, 0xFF));
        }
        for px in adjust(&buf, -2.5).pixels {
            assert_eq!(unpack(px), (0, 0, 0, 0xFF));
        }
    }

    #[test]
    fn clamping_loses_information() {
        // Doubling then halving is not a round trip once a channel saturates.
        let buf = PixelBuffer::filled(1, 1, pack(200, 10, 10, 0xFF));
        let back = adjust(&adjust(&buf, 2.0), 0.5);
        let (r, g, ..) = unpack(back.pixels[0]);
        assert_eq!(r, 127); // 200 -> 255 (clamped) -> 127
        assert_eq!(g, 10);  // 10 -> 20 -> 10 survives
        assert_ne!(back, buf);
    }
}
