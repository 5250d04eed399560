// ============================================================================
// OPERATION CATALOG — every reversible edit as a tagged variant
// ============================================================================
//
// Each operation is a pure function `&RasterImage -> RasterImage`: filters
// keep the shape, geometry ops produce a differently-shaped buffer. The enum
// replaces run-time function-pointer dispatch so the operation set stays
// exhaustively checkable.

pub mod adjustments;
pub mod compositor;
pub mod filters;
pub mod transform;

use thiserror::Error;

use crate::raster::RasterImage;

/// Validation failures raised by geometry operations. Raised before any
/// buffer is built; the input image is never touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpError {
    #[error("invalid crop region: origin ({x}, {y}), size {width}x{height} leaves no pixels inside a {image_width}x{image_height} image")]
    InvalidRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("invalid resize dimensions {width}x{height}: both sides must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// One editing operation. Parameters are captured at construction so an
/// `Operation` can be applied, logged, and described without extra context.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Grayscale,
    Sepia,
    Invert,
    Cyberpunk,
    Retro,
    Polaroid,
    Comic,
    Brightness(f64),
    Contrast(f64),
    ColorAdjust { red: f64, green: f64, blue: f64 },
    Crop { x: u32, y: u32, width: u32, height: u32 },
    Resize { width: u32, height: u32 },
    Rotate90,
    CompositeFrame(RasterImage),
}

impl Operation {
    /// Run the operation, producing a fresh image. The input is only read.
    pub fn apply(&self, image: &RasterImage) -> Result<RasterImage, OpError> {
        match self {
            Operation::Grayscale => Ok(filters::grayscale(image)),
            Operation::Sepia => Ok(filters::sepia(image)),
            Operation::Invert => Ok(filters::invert(image)),
            Operation::Cyberpunk => Ok(filters::cyberpunk(image)),
            Operation::Retro => Ok(filters::retro(image)),
            Operation::Polaroid => Ok(filters::polaroid(image)),
            Operation::Comic => Ok(filters::comic(image)),
            Operation::Brightness(factor) => Ok(adjustments::brightness(image, *factor)),
            Operation::Contrast(factor) => Ok(adjustments::contrast(image, *factor)),
            Operation::ColorAdjust { red, green, blue } => {
                Ok(adjustments::color_adjust(image, *red, *green, *blue))
            }
            Operation::Crop { x, y, width, height } => {
                transform::crop(image, *x, *y, *width, *height)
            }
            Operation::Resize { width, height } => transform::resize(image, *width, *height),
            Operation::Rotate90 => Ok(transform::rotate_90cw(image)),
            Operation::CompositeFrame(overlay) => Ok(compositor::composite_frame(image, overlay)),
        }
    }

    /// Short human label, recorded in the session history and the log.
    pub fn description(&self) -> String {
        match self {
            Operation::Grayscale => "Grayscale".to_string(),
            Operation::Sepia => "Sepia".to_string(),
            Operation::Invert => "Invert".to_string(),
            Operation::Cyberpunk => "Cyberpunk".to_string(),
            Operation::Retro => "Retro".to_string(),
            Operation::Polaroid => "Polaroid".to_string(),
            Operation::Comic => "Comic".to_string(),
            Operation::Brightness(factor) => format!("Brightness {:.2}", factor),
            Operation::Contrast(factor) => format!("Contrast {:.2}", factor),
            Operation::ColorAdjust { red, green, blue } => {
                format!("Adjust Colors R{:.2} G{:.2} B{:.2}", red, green, blue)
            }
            Operation::Crop { x, y, width, height } => {
                format!("Crop {}x{} at ({}, {})", width, height, x, y)
            }
            Operation::Resize { width, height } => format!("Resize {}x{}", width, height),
            Operation::Rotate90 => "Rotate 90\u{b0}".to_string(),
            Operation::CompositeFrame(overlay) => {
                format!("Frame {}x{}", overlay.width(), overlay.height())
            }
        }
    }
}
