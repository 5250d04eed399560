// ============================================================================
// CONTAINER I/O — the decode/encode boundary around the engine
// ============================================================================
//
// The engine itself never touches files: it consumes and produces decoded
// BGRA8 buffers. This module is the external collaborator that turns
// PNG/JPEG/BMP containers into RasterImages and back, choosing the encoder
// by the output path's extension.

use std::path::Path;

use thiserror::Error;

use crate::raster::{RasterError, RasterImage};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("unsupported output format '.{0}' (supported: png, jpg, jpeg, bmp)")]
    UnsupportedFormat(String),
}

/// Decode any container the `image` crate recognises into a BGRA8 buffer.
pub fn decode_image(path: &Path) -> Result<RasterImage, IoError> {
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(RasterImage::from_rgba8(width, height, decoded.into_raw())?)
}

/// Encode `image` to `path`, picking the container from the extension.
/// JPEG output drops the alpha channel (the format has none).
pub fn encode_image(img: &RasterImage, path: &Path) -> Result<(), IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rgba = image::RgbaImage::from_raw(img.width(), img.height(), img.to_rgba8())
        .ok_or_else(|| {
            // from_raw only fails on a length mismatch, which the RasterImage
            // invariant rules out; map it to the raster error for safety.
            IoError::Raster(RasterError::InvalidFormat {
                width: img.width(),
                height: img.height(),
                expected: img.height() as usize * img.stride(),
                actual: img.pixels().len(),
            })
        })?;

    match ext.as_str() {
        "png" => rgba.save_with_format(path, image::ImageFormat::Png)?,
        "jpg" | "jpeg" => {
            let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
            rgb.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        "bmp" => rgba.save_with_format(path, image::ImageFormat::Bmp)?,
        other => return Err(IoError::UnsupportedFormat(other.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bgra;

    #[test]
    fn png_round_trip_preserves_bgra_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut img = RasterImage::from_pixel(3, 2, Bgra::new(10, 20, 30, 255)).unwrap();
        img.set_pixel(2, 1, Bgra::new(200, 100, 50, 128)).unwrap();

        encode_image(&img, &path).unwrap();
        let back = decode_image(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let img = RasterImage::from_pixel(1, 1, Bgra::new(0, 0, 0, 255)).unwrap();
        let err = encode_image(&img, Path::new("out.webp")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "webp"));
    }

    #[test]
    fn missing_input_surfaces_the_image_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(decode_image(&dir.path().join("absent.png")).is_err());
    }
}
