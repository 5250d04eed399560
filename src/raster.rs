// ============================================================================
// RASTER IMAGE — owned BGRA8 pixel buffer, the unit every operation consumes
// ============================================================================
//
// Channel order is byte0=Blue, byte1=Green, byte2=Red, byte3=Alpha, kept
// verbatim from the decoded source format. Zero-area images are rejected at
// construction, so `width > 0 && height > 0` holds for every live instance
// and `pixels.len() == height * stride` always.

use thiserror::Error;

/// Bytes per pixel in the fixed BGRA8 layout.
pub const BYTES_PER_PIXEL: usize = 4;

/// Errors raised by buffer construction and pixel access.
/// All are validation failures: nothing is mutated when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("buffer length {actual} does not match {width}x{height} BGRA8 ({expected} bytes)")]
    InvalidFormat {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("zero-area image {width}x{height} is not representable")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// A single BGRA pixel, in buffer byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra {
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

impl From<[u8; 4]> for Bgra {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Bgra> for [u8; 4] {
    fn from(p: Bgra) -> Self {
        [p.b, p.g, p.r, p.a]
    }
}

/// A decoded raster image: contiguous BGRA8 bytes plus dimensions.
///
/// `Clone` is a deep copy — history snapshots rely on cloned buffers being
/// immune to later edits. Operations never mutate an existing image; they
/// build a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an already-decoded BGRA8 buffer.
    pub fn from_bgra8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = height as usize * width as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RasterError::InvalidFormat {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Wrap an RGBA8 buffer (the `image` crate's native order), swapping the
    /// red and blue channels in place.
    pub fn from_rgba8(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self, RasterError> {
        for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        Self::from_bgra8(width, height, pixels)
    }

    /// A solid-colour image. Handy for overlays and tests.
    pub fn from_pixel(width: u32, height: u32, fill: Bgra) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            pixels.extend_from_slice(&<[u8; 4]>::from(fill));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row: `width * 4`.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Heap footprint of the pixel buffer, used for history byte accounting.
    pub fn memory_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// One row as a byte slice. Panics when `y >= height`; callers index
    /// rows they have already bounds-checked.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Bgra, RasterError> {
        let idx = self.offset_of(x, y)?;
        Ok(Bgra::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Bgra) -> Result<(), RasterError> {
        let idx = self.offset_of(x, y)?;
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&<[u8; 4]>::from(color));
        Ok(())
    }

    /// Copy out the buffer in RGBA8 order for the encoder boundary.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = self.pixels.clone();
        for px in out.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        out
    }

    fn offset_of(&self, x: u32, y: u32) -> Result<usize, RasterError> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.stride() + x as usize * BYTES_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bgra8_rejects_length_mismatch() {
        let err = RasterImage::from_bgra8(2, 2, vec![0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            RasterError::InvalidFormat { width: 2, height: 2, expected: 16, actual: 15 }
        );
    }

    #[test]
    fn zero_area_is_rejected() {
        assert!(matches!(
            RasterImage::from_bgra8(0, 4, Vec::new()),
            Err(RasterError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            RasterImage::from_pixel(3, 0, Bgra::new(0, 0, 0, 255)),
            Err(RasterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut img = RasterImage::from_pixel(2, 2, Bgra::new(1, 2, 3, 255)).unwrap();
        assert_eq!(img.get_pixel(1, 1).unwrap(), Bgra::new(1, 2, 3, 255));
        assert!(matches!(img.get_pixel(2, 0), Err(RasterError::OutOfBounds { .. })));
        assert!(matches!(
            img.set_pixel(0, 2, Bgra::new(0, 0, 0, 0)),
            Err(RasterError::OutOfBounds { .. })
        ));
        img.set_pixel(0, 1, Bgra::new(9, 8, 7, 6)).unwrap();
        assert_eq!(img.get_pixel(0, 1).unwrap(), Bgra::new(9, 8, 7, 6));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut original = RasterImage::from_pixel(2, 1, Bgra::new(10, 20, 30, 255)).unwrap();
        let snapshot = original.clone();
        original.set_pixel(0, 0, Bgra::new(0, 0, 0, 0)).unwrap();
        assert_eq!(snapshot.get_pixel(0, 0).unwrap(), Bgra::new(10, 20, 30, 255));
    }

    #[test]
    fn rgba_round_trip_swaps_channels() {
        let img = RasterImage::from_rgba8(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.get_pixel(0, 0).unwrap(), Bgra::new(3, 2, 1, 4));
        assert_eq!(img.to_rgba8(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn stride_and_row_respect_width() {
        let img = RasterImage::from_bgra8(3, 2, (0..24).collect()).unwrap();
        assert_eq!(img.stride(), 12);
        assert_eq!(img.row(1), &(12..24).collect::<Vec<u8>>()[..]);
    }
}
