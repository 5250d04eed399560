// ============================================================================
// STYLIZED FILTERS — grayscale, sepia, invert and the preset looks
// ============================================================================
//
// Every filter is a pure per-pixel mapping built on `map_pixels` (see
// adjustments.rs). Inputs arrive as whole-valued f64 channels in BGRA order;
// outputs are rounded to nearest and clamped to [0, 255] by the helper.
// Alpha passes through untouched.

use crate::ops::adjustments::map_pixels;
use crate::raster::RasterImage;

/// Luminance grayscale with the BT.601 weights 0.299 R + 0.587 G + 0.114 B.
pub fn grayscale(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| {
        let gray = (0.299 * r + 0.587 * g + 0.114 * b).round();
        (gray, gray, gray, a)
    })
}

/// Classic sepia matrix.
pub fn sepia(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| {
        let nr = 0.393 * r + 0.769 * g + 0.189 * b;
        let ng = 0.349 * r + 0.686 * g + 0.168 * b;
        let nb = 0.272 * r + 0.534 * g + 0.131 * b;
        (nb, ng, nr, a)
    })
}

/// Invert all colour channels. Applying it twice restores the input.
pub fn invert(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| (255.0 - b, 255.0 - g, 255.0 - r, a))
}

/// Purple-pink neon tint: red +50, green -30, blue +60.
pub fn cyberpunk(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| (b + 60.0, g - 30.0, r + 50.0, a))
}

/// Faded warm look: channels collapse toward their integer mean, then the
/// mean is shifted per channel (blue -20, green +15, red +30).
pub fn retro(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| {
        // (R + G + B) / 3 with integer division; inputs are whole-valued.
        let faded = ((r + g + b) / 3.0).floor();
        (faded - 20.0, faded + 15.0, faded + 30.0, a)
    })
}

/// Slight warm lift: blue +10, green +5, red +25.
pub fn polaroid(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| (b + 10.0, g + 5.0, r + 25.0, a))
}

/// Posterize to pure black and white on the integer channel mean:
/// above 128 becomes white, everything else black.
pub fn comic(image: &RasterImage) -> RasterImage {
    map_pixels(image, |b, g, r, a| {
        let gray = ((r + g + b) / 3.0).floor();
        let v = if gray > 128.0 { 255.0 } else { 0.0 };
        (v, v, v, a)
    })
}
