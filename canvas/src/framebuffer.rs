//! Pixel memory: the `Color` type and the pitch-aware `Framebuffer`.
//!
//! Every pixel occupies four bytes in B, G, R, A order. Rows are `pitch` bytes
//! apart and row 0 is the visually bottom row. Presentation layers that read
//! the buffer (window blits, image encoders) must honour this layout exactly.

#[cfg(test)]
#[path = "framebuffer_test.rs"]
mod framebuffer_test;

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::consts::BYTES_PER_PIXEL;

/// An 8-bit-per-channel color.
///
/// Field order is logical only; [`Color::to_bgra`] defines the memory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// The four bytes this color occupies in the framebuffer.
    #[must_use]
    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Inverse of [`Color::to_bgra`].
    #[must_use]
    pub const fn from_bgra(bytes: [u8; 4]) -> Self {
        Self { r: bytes[2], g: bytes[1], b: bytes[0], a: bytes[3] }
    }
}

/// Failure to allocate or shape a framebuffer.
#[derive(Debug, thiserror::Error)]
pub enum FramebufferError {
    #[error("pitch {pitch} is smaller than {width} pixels of {BYTES_PER_PIXEL} bytes")]
    PitchTooSmall { width: u32, pitch: usize },
    #[error("framebuffer of {width}x{height} with pitch {pitch} overflows the address space")]
    TooLarge { width: u32, height: u32, pitch: usize },
    #[error("could not allocate {bytes} bytes of pixel memory: {source}")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
}

/// A rectangular region of BGRA pixel memory.
///
/// The core only reads and writes through a borrowed `&mut Framebuffer`; it
/// never holds on to one between ticks.
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pitch: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a zeroed framebuffer with tightly packed rows.
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError`] if the size overflows or memory runs out.
    pub fn new(width: u32, height: u32) -> Result<Self, FramebufferError> {
        Self::with_pitch(width, height, width as usize * BYTES_PER_PIXEL)
    }

    /// Allocate a zeroed framebuffer whose rows are `pitch` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::PitchTooSmall`] if a row does not fit in
    /// `pitch`, or an allocation error.
    pub fn with_pitch(width: u32, height: u32, pitch: usize) -> Result<Self, FramebufferError> {
        let mut fb = Self::default();
        fb.reallocate(width, height, pitch)?;
        Ok(fb)
    }

    /// Resize in place, discarding previous contents. Rows become tightly packed.
    ///
    /// On failure the framebuffer is left empty (zero area).
    ///
    /// # Errors
    ///
    /// Same as [`Framebuffer::new`].
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FramebufferError> {
        let pitch = width as usize * BYTES_PER_PIXEL;
        let result = self.reallocate(width, height, pitch);
        if result.is_err() {
            *self = Self::default();
        }
        result
    }

    fn reallocate(&mut self, width: u32, height: u32, pitch: usize) -> Result<(), FramebufferError> {
        if pitch < width as usize * BYTES_PER_PIXEL {
            return Err(FramebufferError::PitchTooSmall { width, pitch });
        }
        let bytes = pitch
            .checked_mul(height as usize)
            .ok_or(FramebufferError::TooLarge { width, height, pitch })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|source| FramebufferError::Allocation { bytes, source })?;
        pixels.resize(bytes, 0);

        self.width = width;
        self.height = height;
        self.pitch = pitch;
        self.pixels = pixels;
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes from the start of one row to the start of the next.
    #[must_use]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// True when no pixel can be addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raw backing bytes, including any row padding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// The `width * 4` pixel bytes of row `y` (row 0 is the bottom).
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of range");
        let start = y as usize * self.pitch;
        &self.pixels[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Mutable view of the `width * 4` pixel bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of range");
        let start = y as usize * self.pitch;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        &mut self.pixels[start..end]
    }

    /// Read one pixel, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = self.offset(x, y);
        let bytes = self.pixels.get(at..at + BYTES_PER_PIXEL)?;
        Some(Color::from_bgra([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Overwrite one pixel. Coordinates must be in bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        let at = self.offset(x, y);
        self.pixels[at..at + BYTES_PER_PIXEL].copy_from_slice(&color.to_bgra());
    }

    /// Byte offset of pixel `(x, y)`.
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.pitch + x as usize * BYTES_PER_PIXEL
    }
}
