//! Flattening the paint buffer into an exportable PNG.
//!
//! Export works at native resolution: one output pixel per logical unit, no
//! pan or zoom, and no checkerboard. Unpainted areas stay fully transparent.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::buffer::PaintBuffer;
use crate::config::CanvasConfig;
use crate::consts::PNG_DATA_URL_PREFIX;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("canvas of {width}x{height} is too large to rasterize")]
    TooLarge { width: u32, height: u32 },
}

/// Whether the RGBA bytes of a `width` x `height` image fit in a `usize`.
fn is_addressable(width: u32, height: u32) -> bool {
    u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4))
        .is_some_and(|len| usize::try_from(len).is_ok())
}

/// Paint every buffered cell onto a transparent `width` x `height` image.
///
/// # Errors
///
/// Returns [`ExportError::TooLarge`] if the pixel buffer cannot be addressed.
pub fn rasterize(buffer: &PaintBuffer, config: &CanvasConfig) -> Result<RgbaImage, ExportError> {
    let (width, height) = (config.width(), config.height());
    if !is_addressable(width, height) {
        return Err(ExportError::TooLarge { width, height });
    }
    let mut image = RgbaImage::new(width, height);
    let size = config.cell_size();

    for (point, color) in buffer.iter() {
        let (Ok(col), Ok(row)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
            continue;
        };
        let pixel = Rgba(color.rgba());
        let left = col.saturating_mul(size);
        let top = row.saturating_mul(size);
        let right = left.saturating_add(size).min(image.width());
        let bottom = top.saturating_add(size).min(image.height());
        for y in top..bottom {
            for x in left..right {
                image.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(image)
}

/// Encode an image as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder rejects the image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}
