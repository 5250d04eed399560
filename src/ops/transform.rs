// ============================================================================
// GEOMETRY OPERATIONS — crop, resize, rotate-90
// ============================================================================
//
// Each produces a new RasterImage with recomputed dimensions; the source
// buffer is only read. Validation runs before any allocation so a failed
// call leaves nothing half-built.

use rayon::prelude::*;

use crate::ops::OpError;
use crate::raster::{BYTES_PER_PIXEL, RasterImage};

/// Copy the sub-rectangle at `(x, y)` out of `image`. The requested extent
/// is clamped to the image bounds; a region that clamps to nothing (or an
/// origin outside the image) is `InvalidRegion`.
pub fn crop(
    image: &RasterImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<RasterImage, OpError> {
    let invalid = || OpError::InvalidRegion {
        x,
        y,
        width,
        height,
        image_width: image.width(),
        image_height: image.height(),
    };

    if x >= image.width() || y >= image.height() {
        return Err(invalid());
    }
    let out_w = width.min(image.width() - x);
    let out_h = height.min(image.height() - y);
    if out_w == 0 || out_h == 0 {
        return Err(invalid());
    }

    let row_start = x as usize * BYTES_PER_PIXEL;
    let row_len = out_w as usize * BYTES_PER_PIXEL;
    let mut pixels = Vec::with_capacity(out_h as usize * row_len);
    for sy in y..y + out_h {
        let row = image.row(sy);
        pixels.extend_from_slice(&row[row_start..row_start + row_len]);
    }

    Ok(finish(out_w, out_h, pixels))
}

/// Nearest-neighbor resample to `new_w x new_h`. Destination pixel
/// `(dx, dy)` reads source `(dx * width / new_w, dy * height / new_h)`
/// with integer floor division.
pub fn resize(image: &RasterImage, new_w: u32, new_h: u32) -> Result<RasterImage, OpError> {
    if new_w == 0 || new_h == 0 {
        return Err(OpError::InvalidDimensions { width: new_w, height: new_h });
    }
    Ok(resample_nearest(image, new_w, new_h))
}

/// The resample core, shared with the compositor (which stretches overlays
/// to the base dimensions). Callers guarantee `new_w > 0 && new_h > 0`.
pub(crate) fn resample_nearest(image: &RasterImage, new_w: u32, new_h: u32) -> RasterImage {
    if new_w == image.width() && new_h == image.height() {
        return image.clone();
    }

    let src_w = image.width() as u64;
    let src_h = image.height() as u64;
    let out_stride = new_w as usize * BYTES_PER_PIXEL;
    let mut pixels = vec![0u8; new_h as usize * out_stride];

    pixels
        .par_chunks_mut(out_stride)
        .enumerate()
        .for_each(|(dy, row_out)| {
            let sy = (dy as u64 * src_h / new_h as u64) as u32;
            let row_in = image.row(sy);
            for dx in 0..new_w as usize {
                let sx = (dx as u64 * src_w / new_w as u64) as usize;
                let src_idx = sx * BYTES_PER_PIXEL;
                let dst_idx = dx * BYTES_PER_PIXEL;
                row_out[dst_idx..dst_idx + BYTES_PER_PIXEL]
                    .copy_from_slice(&row_in[src_idx..src_idx + BYTES_PER_PIXEL]);
            }
        });

    finish(new_w, new_h, pixels)
}

/// Rotate 90 degrees clockwise. Output dimensions are swapped; source
/// `(x, y)` lands at destination `(height - 1 - y, x)`. Four applications
/// compose to the identity.
pub fn rotate_90cw(image: &RasterImage) -> RasterImage {
    let w = image.width();
    let h = image.height();
    let out_stride = h as usize * BYTES_PER_PIXEL;
    let mut pixels = vec![0u8; w as usize * out_stride];

    for y in 0..h {
        let row_in = image.row(y);
        let dst_x = (h - 1 - y) as usize;
        for x in 0..w as usize {
            let src_idx = x * BYTES_PER_PIXEL;
            let dst_idx = x * out_stride + dst_x * BYTES_PER_PIXEL;
            pixels[dst_idx..dst_idx + BYTES_PER_PIXEL]
                .copy_from_slice(&row_in[src_idx..src_idx + BYTES_PER_PIXEL]);
        }
    }

    finish(h, w, pixels)
}

/// Assemble an output image from a buffer this module sized itself.
/// Dimensions are non-zero by construction, so the constructor cannot fail;
/// the unreachable arm documents that invariant and is never taken.
fn finish(width: u32, height: u32, pixels: Vec<u8>) -> RasterImage {
    match RasterImage::from_bgra8(width, height, pixels) {
        Ok(img) => img,
        Err(_) => unreachable!("geometry ops build exact-sized buffers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bgra;

    /// 3x2 image whose pixel at (x, y) is Bgra(x, y, 100+x, 255).
    fn coords() -> RasterImage {
        let mut img = RasterImage::from_pixel(3, 2, Bgra::new(0, 0, 0, 255)).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                img.set_pixel(x, y, Bgra::new(x as u8, y as u8, 100 + x as u8, 255)).unwrap();
            }
        }
        img
    }

    #[test]
    fn crop_copies_the_subrectangle() {
        let out = crop(&coords(), 1, 1, 2, 1).unwrap();
        assert_eq!((out.width(), out.height()), (2, 1));
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(1, 1, 101, 255));
        assert_eq!(out.get_pixel(1, 0).unwrap(), Bgra::new(2, 1, 102, 255));
    }

    #[test]
    fn crop_clamps_oversized_extents() {
        let out = crop(&coords(), 2, 0, 50, 50).unwrap();
        assert_eq!((out.width(), out.height()), (1, 2));
        assert_eq!(out.get_pixel(0, 1).unwrap(), Bgra::new(2, 1, 102, 255));
    }

    #[test]
    fn crop_rejects_bad_regions() {
        let img = coords();
        assert!(matches!(crop(&img, 3, 0, 1, 1), Err(OpError::InvalidRegion { .. })));
        assert!(matches!(crop(&img, 0, 2, 1, 1), Err(OpError::InvalidRegion { .. })));
        assert!(matches!(crop(&img, 1, 1, 0, 5), Err(OpError::InvalidRegion { .. })));
    }

    #[test]
    fn resize_rejects_zero_dimensions() {
        let img = coords();
        assert_eq!(
            resize(&img, 0, 1).unwrap_err(),
            OpError::InvalidDimensions { width: 0, height: 1 }
        );
        assert_eq!(
            resize(&img, 4, 0).unwrap_err(),
            OpError::InvalidDimensions { width: 4, height: 0 }
        );
    }

    #[test]
    fn resize_uses_floor_mapping() {
        // Upscale 3x2 -> 6x2: dx in {0,1} -> sx 0, {2,3} -> sx 1, {4,5} -> sx 2.
        let out = resize(&coords(), 6, 2).unwrap();
        assert_eq!((out.width(), out.height()), (6, 2));
        for dx in 0..6u32 {
            let expect = dx * 3 / 6;
            assert_eq!(out.get_pixel(dx, 0).unwrap().b, expect as u8);
        }
        // Downscale 3x2 -> 1x1: maps to source (0, 0).
        let out = resize(&coords(), 1, 1).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), Bgra::new(0, 0, 100, 255));
    }

    #[test]
    fn rotate_maps_source_to_swapped_coordinates() {
        let img = coords();
        let out = rotate_90cw(&img);
        assert_eq!((out.width(), out.height()), (2, 3));
        // src (x, y) -> dst (h - 1 - y, x) with h = 2
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    out.get_pixel(1 - y, x).unwrap(),
                    img.get_pixel(x, y).unwrap()
                );
            }
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        let img = coords();
        let mut out = img.clone();
        for _ in 0..4 {
            out = rotate_90cw(&out);
        }
        assert_eq!(out, img);
    }
}
