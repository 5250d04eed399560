// ============================================================================
// ADJUSTMENT OPERATIONS — brightness, contrast, per-channel scaling
// ============================================================================
//
// All adjustments run on a fresh copy of the buffer and iterate every 4-byte
// BGRA group. Channel math is done in f64, rounded to nearest, then clamped
// to [0, 255]. Rows are processed in parallel via rayon.

use rayon::prelude::*;

use crate::raster::{BYTES_PER_PIXEL, RasterImage};

/// Apply a per-pixel transform to every pixel of `image`, producing a new
/// image of the same shape. `transform` receives and returns channels in
/// buffer order `(b, g, r, a)` as f64; outputs are rounded and clamped.
pub(crate) fn map_pixels<F>(image: &RasterImage, transform: F) -> RasterImage
where
    F: Fn(f64, f64, f64, f64) -> (f64, f64, f64, f64) + Sync,
{
    let stride = image.stride();
    let src = image.pixels();
    let mut out = image.clone();

    out.pixels_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src[y * stride..(y + 1) * stride];
            for (px_out, px_in) in row_out
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(row_in.chunks_exact(BYTES_PER_PIXEL))
            {
                let (nb, ng, nr, na) = transform(
                    px_in[0] as f64,
                    px_in[1] as f64,
                    px_in[2] as f64,
                    px_in[3] as f64,
                );
                px_out[0] = nb.round().clamp(0.0, 255.0) as u8;
                px_out[1] = ng.round().clamp(0.0, 255.0) as u8;
                px_out[2] = nr.round().clamp(0.0, 255.0) as u8;
                px_out[3] = na.round().clamp(0.0, 255.0) as u8;
            }
        });

    out
}

/// Brightness shift: `factor` 1.0 is identity. The factor maps to a flat
/// per-channel offset of `round((factor - 1.0) * 100)`; alpha is untouched.
pub fn brightness(image: &RasterImage, factor: f64) -> RasterImage {
    let offset = ((factor - 1.0) * 100.0).round();
    map_pixels(image, |b, g, r, a| (b + offset, g + offset, r + offset, a))
}

/// Contrast stretch around mid-gray: `c' = c * factor + 255 * (1 - factor) / 2`.
/// A factor of 1.0 is identity; below 1.0 flattens toward gray.
pub fn contrast(image: &RasterImage, factor: f64) -> RasterImage {
    let correction = 255.0 * (1.0 - factor) / 2.0;
    map_pixels(image, |b, g, r, a| {
        (b * factor + correction, g * factor + correction, r * factor + correction, a)
    })
}

/// Scale each colour channel independently. Alpha is untouched.
pub fn color_adjust(image: &RasterImage, red: f64, green: f64, blue: f64) -> RasterImage {
    map_pixels(image, |b, g, r, a| (b * blue, g * green, r * red, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bgra;

    fn single(b: u8, g: u8, r: u8) -> RasterImage {
        RasterImage::from_pixel(1, 1, Bgra::new(b, g, r, 255)).unwrap()
    }

    #[test]
    fn brightness_offsets_and_clamps() {
        // factor 1.3 -> offset +30
        let out = brightness(&single(10, 120, 240), 1.3);
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(40, 150, 255, 255));
        // factor 0.5 -> offset -50, clamped at zero
        let out = brightness(&single(20, 60, 200), 0.5);
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(0, 10, 150, 255));
    }

    #[test]
    fn brightness_identity_at_one() {
        let img = single(11, 22, 33);
        assert_eq!(brightness(&img, 1.0), img);
    }

    #[test]
    fn contrast_pivots_on_mid_gray() {
        // A channel at 100 with factor 2.0 lands at 100*2 - 255/2 = 72.5 -> 73.
        let out = contrast(&single(100, 0, 255), 2.0);
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(73, 0, 255, 255));
        // factor 0 collapses everything to 255/2 -> 128 after rounding
        let out = contrast(&single(3, 250, 90), 0.0);
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(128, 128, 128, 255));
    }

    #[test]
    fn color_adjust_scales_channels_in_bgra_order() {
        let out = color_adjust(&single(100, 100, 100), 0.5, 1.0, 2.0);
        // blue factor 2.0, green 1.0, red 0.5
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(200, 100, 50, 255));
    }

    #[test]
    fn adjustments_leave_alpha_alone() {
        let img = RasterImage::from_pixel(2, 2, Bgra::new(5, 5, 5, 42)).unwrap();
        assert_eq!(brightness(&img, 1.9).get_pixel(1, 1).unwrap().a, 42);
        assert_eq!(contrast(&img, 3.0).get_pixel(0, 0).unwrap().a, 42);
        assert_eq!(color_adjust(&img, 9.0, 9.0, 9.0).get_pixel(1, 0).unwrap().a, 42);
    }
}
