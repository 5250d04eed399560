// ============================================================================
// FRAME COMPOSITOR — alpha-over blending of a decorative overlay
// ============================================================================
//
// The overlay is stretched to the base dimensions first (nearest-neighbor,
// same resampler as Resize), then blended with the standard alpha-over rule:
// `out = overlay * a + base * (1 - a)` per colour channel, output alpha is
// the channel-wise max.

use rayon::prelude::*;

use crate::ops::transform::resample_nearest;
use crate::raster::{BYTES_PER_PIXEL, RasterImage};

/// Blend `overlay` on top of `base`, returning a new image with the base's
/// dimensions. Overlay pixels with zero alpha leave the base untouched;
/// fully opaque overlay pixels replace it.
pub fn composite_frame(base: &RasterImage, overlay: &RasterImage) -> RasterImage {
    let fitted;
    let overlay = if overlay.width() == base.width() && overlay.height() == base.height() {
        overlay
    } else {
        fitted = resample_nearest(overlay, base.width(), base.height());
        &fitted
    };

    let stride = base.stride();
    let over_px = overlay.pixels();
    let mut out = base.clone();

    out.pixels_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_over = &over_px[y * stride..(y + 1) * stride];
            for (px_base, px_over) in row_out
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(row_over.chunks_exact(BYTES_PER_PIXEL))
            {
                let alpha = px_over[3] as f64 / 255.0;
                for c in 0..3 {
                    let blended =
                        px_over[c] as f64 * alpha + px_base[c] as f64 * (1.0 - alpha);
                    px_base[c] = blended.round().clamp(0.0, 255.0) as u8;
                }
                px_base[3] = px_base[3].max(px_over[3]);
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bgra;

    #[test]
    fn opaque_overlay_replaces_base() {
        let base = RasterImage::from_pixel(2, 2, Bgra::new(10, 20, 30, 255)).unwrap();
        let overlay = RasterImage::from_pixel(2, 2, Bgra::new(200, 100, 50, 255)).unwrap();
        let out = composite_frame(&base, &overlay);
        assert_eq!(out.get_pixel(1, 1).unwrap(), Bgra::new(200, 100, 50, 255));
    }

    #[test]
    fn transparent_overlay_is_a_no_op() {
        let base = RasterImage::from_pixel(2, 2, Bgra::new(10, 20, 30, 200)).unwrap();
        let overlay = RasterImage::from_pixel(2, 2, Bgra::new(255, 255, 255, 0)).unwrap();
        assert_eq!(composite_frame(&base, &overlay), base);
    }

    #[test]
    fn half_alpha_blends_midway_and_alpha_takes_the_max() {
        let base = RasterImage::from_pixel(1, 1, Bgra::new(0, 0, 0, 100)).unwrap();
        let overlay = RasterImage::from_pixel(1, 1, Bgra::new(255, 255, 255, 128)).unwrap();
        let out = composite_frame(&base, &overlay);
        // 255 * (128/255) = 128; alpha = max(100, 128)
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(128, 128, 128, 128));
    }

    #[test]
    fn mismatched_overlay_is_stretched_to_base() {
        let base = RasterImage::from_pixel(4, 4, Bgra::new(0, 0, 0, 255)).unwrap();
        let overlay = RasterImage::from_pixel(1, 1, Bgra::new(7, 8, 9, 255)).unwrap();
        let out = composite_frame(&base, &overlay);
        assert_eq!((out.width(), out.height()), (4, 4));
        assert_eq!(out.get_pixel(3, 3).unwrap(), Bgra::new(7, 8, 9, 255));
    }
}
