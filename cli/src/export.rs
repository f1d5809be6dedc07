//! Framebuffer to PNG.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::Path;

use canvas::framebuffer::Framebuffer;
use image::{ImageFormat, RgbaImage};

/// Top-down RGBA copy of `fb`, opaque, padding dropped.
///
/// Row 0 of the framebuffer is the bottom of the picture, so rows are
/// emitted in reverse. Alpha is ignored on presentation and forced to 255.
#[must_use]
pub fn to_rgba(fb: &Framebuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(fb.width() as usize * fb.height() as usize * 4);
    for y in (0..fb.height()).rev() {
        for px in fb.row(y).chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], u8::MAX]);
        }
    }
    out
}

/// Error writing a framebuffer out as an image.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot export an empty {width}x{height} framebuffer")]
    Empty { width: u32, height: u32 },
    #[error("png encode: {0}")]
    Image(#[from] image::ImageError),
}

/// Encode `fb` as a PNG at `path`.
///
/// # Errors
///
/// [`ExportError::Empty`] for a zero-area framebuffer, [`ExportError::Image`]
/// if encoding or writing fails.
pub fn write_png(fb: &Framebuffer, path: &Path) -> Result<(), ExportError> {
    let empty = ExportError::Empty { width: fb.width(), height: fb.height() };
    if fb.is_empty() {
        return Err(empty);
    }
    let image = RgbaImage::from_raw(fb.width(), fb.height(), to_rgba(fb)).ok_or(empty)?;
    image.save_with_format(path, ImageFormat::Png)?;
    tracing::info!(path = %path.display(), width = fb.width(), height = fb.height(), "wrote png");
    Ok(())
}
