//! Bitmap fonts and alpha-blended text drawing.
//!
//! A [`Font`] is a fixed table of 256 glyphs, one per byte value. Each glyph
//! is a square 8-bit coverage bitmap (rows stored top to bottom) plus its
//! placement metrics. Building the coverage from an outline font is the job
//! of an external rasterizer plugged in through [`Font::build`];
//! [`Font::builtin`] provides an 8x8 bitmap font that needs no font file.

#[cfg(test)]
#[path = "glyph_test.rs"]
mod glyph_test;

use std::collections::TryReserveError;

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

use crate::consts::BYTES_PER_PIXEL;
use crate::framebuffer::{Color, Framebuffer};

/// Number of entries in every font table.
pub const GLYPH_COUNT: usize = 256;

/// Cell size of the built-in font.
const BUILTIN_GLYPH_SIZE: usize = 8;

/// Placement metrics for one glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    /// Horizontal distance to the next glyph's left edge.
    pub advance: i32,
    /// Offset from the pen position to the bitmap's left column.
    pub offset_left: i32,
    /// Offset from the baseline to the bitmap's top row, measured downward.
    /// Negative for glyphs that rise above the baseline.
    pub offset_top: i32,
}

/// Failure to build a font table.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("glyph cell size must be non-zero")]
    EmptyGlyphCell,
    #[error("glyph cell size {0} overflows the coverage table")]
    TooLarge(usize),
    #[error("could not allocate {bytes} bytes of glyph coverage: {source}")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
}

/// An immutable 256-glyph coverage font.
#[derive(Debug, Clone)]
pub struct Font {
    glyph_size: usize,
    line_advance: i32,
    metrics: Vec<GlyphMetrics>,
    coverage: Vec<u8>,
}

impl Font {
    /// Build a font by asking `rasterize` to fill each glyph cell.
    ///
    /// `rasterize` receives the byte value and a zeroed `glyph_size * glyph_size`
    /// coverage buffer (row-major, top row first) and returns the glyph's metrics.
    ///
    /// # Errors
    ///
    /// Returns [`FontError`] for a zero cell size or if the coverage table
    /// cannot be allocated.
    pub fn build<F>(glyph_size: usize, line_advance: i32, mut rasterize: F) -> Result<Self, FontError>
    where
        F: FnMut(u8, &mut [u8]) -> GlyphMetrics,
    {
        if glyph_size == 0 {
            return Err(FontError::EmptyGlyphCell);
        }
        let cell = glyph_size.checked_mul(glyph_size).ok_or(FontError::TooLarge(glyph_size))?;
        let bytes = cell.checked_mul(GLYPH_COUNT).ok_or(FontError::TooLarge(glyph_size))?;

        let mut coverage = Vec::new();
        coverage
            .try_reserve_exact(bytes)
            .map_err(|source| FontError::Allocation { bytes, source })?;
        coverage.resize(bytes, 0);

        let mut metrics = Vec::with_capacity(GLYPH_COUNT);
        for (code, cell_coverage) in (0..=u8::MAX).zip(coverage.chunks_exact_mut(cell)) {
            metrics.push(rasterize(code, cell_coverage));
        }

        Ok(Self { glyph_size, line_advance, metrics, coverage })
    }

    /// The 8x8 Latin-1 bitmap font from `font8x8`, coverage 0 or 255.
    ///
    /// Byte values without a glyph (control codes) are left blank but still
    /// advance the pen.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Allocation`] if the table cannot be allocated.
    pub fn builtin() -> Result<Self, FontError> {
        let size = BUILTIN_GLYPH_SIZE as i32;
        Self::build(BUILTIN_GLYPH_SIZE, size + 2, |code, cell| {
            let ch = char::from(code);
            let rows = BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch));
            if let Some(rows) = rows {
                for (row, bits) in cell.chunks_exact_mut(BUILTIN_GLYPH_SIZE).zip(rows) {
                    for (col, value) in row.iter_mut().enumerate() {
                        // Bit 0 is the leftmost column.
                        if bits & (1 << col) != 0 {
                            *value = u8::MAX;
                        }
                    }
                }
            }
            GlyphMetrics { advance: size, offset_left: 0, offset_top: -(size - 1) }
        })
    }

    /// Width and height of every glyph bitmap.
    #[must_use]
    pub fn glyph_size(&self) -> usize {
        self.glyph_size
    }

    /// Vertical distance between consecutive baselines.
    #[must_use]
    pub fn line_advance(&self) -> i32 {
        self.line_advance
    }

    #[must_use]
    pub fn metrics(&self, code: u8) -> GlyphMetrics {
        self.metrics[usize::from(code)]
    }

    /// Coverage bitmap of `code`, top row first.
    #[must_use]
    pub fn coverage(&self, code: u8) -> &[u8] {
        let cell = self.glyph_size * self.glyph_size;
        let start = usize::from(code) * cell;
        &self.coverage[start..start + cell]
    }
}

/// Blend `text` into the framebuffer starting at pen position `left_edge`
/// on `baseline`, one glyph per byte, left to right.
///
/// Coverage acts as alpha: `dst = (a * src + (255 - a) * dst) >> 8` for the
/// color channels. The destination alpha is set to opaque. No wrapping is
/// done; callers step `baseline` by [`Font::line_advance`] between lines.
///
/// Returns the pen position after the last glyph.
pub fn draw_text(font: &Font, fb: &mut Framebuffer, text: &[u8], left_edge: i32, baseline: i32, color: Color) -> i32 {
    let mut pen = left_edge;
    for &code in text {
        let metrics = font.metrics(code);
        draw_glyph(
            fb,
            font.coverage(code),
            font.glyph_size(),
            i64::from(pen) + i64::from(metrics.offset_left),
            i64::from(baseline) - i64::from(metrics.offset_top),
            color,
        );
        pen += metrics.advance;
    }
    pen
}

/// Composite one glyph whose top-left pixel lands at `(left, top)`.
///
/// Bitmap rows run downward while framebuffer rows run upward, so source row
/// `r` goes to framebuffer row `top - r`.
fn draw_glyph(fb: &mut Framebuffer, coverage: &[u8], size: usize, left: i64, top: i64, color: Color) {
    let width = i64::from(fb.width());
    let height = i64::from(fb.height());
    let size_i = size as i64;

    let col_start = (-left).clamp(0, size_i);
    let col_end = (width - left).clamp(0, size_i);
    let row_start = (top - (height - 1)).clamp(0, size_i);
    let row_end = (top + 1).clamp(0, size_i);
    if col_start >= col_end || row_start >= row_end {
        return;
    }

    let src = [u32::from(color.b), u32::from(color.g), u32::from(color.r)];
    for r in row_start..row_end {
        let dst_row = fb.row_mut((top - r) as u32);
        let src_row = &coverage[r as usize * size..(r as usize + 1) * size];
        for c in col_start..col_end {
            let a = u32::from(src_row[c as usize]);
            let at = (left + c) as usize * BYTES_PER_PIXEL;
            let px = &mut dst_row[at..at + BYTES_PER_PIXEL];
            for (channel, s) in px.iter_mut().zip(src) {
                *channel = ((a * s + (255 - a) * u32::from(*channel)) >> 8) as u8;
            }
            px[3] = u8::MAX;
        }
    }
}
