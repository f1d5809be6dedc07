//! Solid-color primitives: clear, rectangle fill, and clipped line drawing.
//!
//! All coordinates are in pixel space with the origin at the bottom-left of
//! the framebuffer. Nothing here blends; each touched pixel is overwritten.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use crate::consts::{BYTES_PER_PIXEL, MAX_CLIP_PASSES};
use crate::framebuffer::{Color, Framebuffer};
use crate::viewport::{Line, Point, Rect};

/// Overwrite every pixel with `color`.
pub fn clear(fb: &mut Framebuffer, color: Color) {
    let bgra = color.to_bgra();
    for y in 0..fb.height() {
        for px in fb.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bgra);
        }
    }
}

/// Fill the part of `rect` that lies inside the framebuffer.
///
/// Each edge is clamped independently to `[0, width]` / `[0, height]`; a
/// rectangle with no area left after clamping writes nothing.
pub fn fill_rect(fb: &mut Framebuffer, rect: &Rect, color: Color) {
    debug_assert!(rect.width >= 0.0, "negative rectangle width {}", rect.width);
    debug_assert!(rect.height >= 0.0, "negative rectangle height {}", rect.height);

    let w = f64::from(fb.width());
    let h = f64::from(fb.height());
    let x_min = rect.min.x.clamp(0.0, w) as usize;
    let x_max = (rect.min.x + rect.width).clamp(0.0, w) as usize;
    let y_min = rect.min.y.clamp(0.0, h) as u32;
    let y_max = (rect.min.y + rect.height).clamp(0.0, h) as u32;
    if x_min >= x_max {
        return;
    }

    let bgra = color.to_bgra();
    for y in y_min..y_max {
        let row = fb.row_mut(y);
        for px in row[x_min * BYTES_PER_PIXEL..x_max * BYTES_PER_PIXEL].chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bgra);
        }
    }
}

// =============================================================
// Cohen–Sutherland clipping
// =============================================================

const REGION_LEFT: u8 = 0x1;
const REGION_RIGHT: u8 = 0x2;
const REGION_BOTTOM: u8 = 0x4;
const REGION_TOP: u8 = 0x8;

/// Inclusive clip window for [`clip_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl ClipRect {
    #[must_use]
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        debug_assert!(x_min <= x_max && y_min <= y_max, "inverted clip window");
        Self { x_min, y_min, x_max, y_max }
    }

    /// Region code of `p`: one bit per violated side, strict inequalities.
    #[must_use]
    pub fn region(&self, p: Point) -> u8 {
        let mut region = 0;
        if p.x < self.x_min {
            region |= REGION_LEFT;
        }
        if p.x > self.x_max {
            region |= REGION_RIGHT;
        }
        if p.y < self.y_min {
            region |= REGION_BOTTOM;
        }
        if p.y > self.y_max {
            region |= REGION_TOP;
        }
        region
    }
}

/// Clip `line` to `clip`, returning the visible part or `None` if nothing is.
///
/// Endpoints already inside are returned untouched. A replaced endpoint lies
/// exactly on the boundary it was clipped against.
#[must_use]
pub fn clip_line(line: Line, clip: &ClipRect) -> Option<Line> {
    let mut line = line;
    let mut region1 = clip.region(line.p1);
    let mut region2 = clip.region(line.p2);

    for _ in 0..MAX_CLIP_PASSES {
        if region1 | region2 == 0 {
            return Some(line);
        }
        if region1 & region2 != 0 {
            return None;
        }

        if region1 == 0 {
            line.p2 = intersect(&line, clip, region2);
            region2 = clip.region(line.p2);
        } else {
            line.p1 = intersect(&line, clip, region1);
            region1 = clip.region(line.p1);
        }
    }

    tracing::debug!(?line, "line clipping did not converge; rejecting");
    None
}

/// Intersection of `line` with the boundary flagged in `region`.
///
/// Only called for an endpoint outside `clip` while the other endpoint is not
/// on the same side, so the line genuinely crosses that boundary and the
/// divisor is non-zero.
fn intersect(line: &Line, clip: &ClipRect, region: u8) -> Point {
    let Line { p1, p2 } = *line;
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    if region & REGION_TOP != 0 {
        debug_assert!(dy != 0.0);
        Point::new(p1.x + dx * (clip.y_max - p1.y) / dy, clip.y_max)
    } else if region & REGION_BOTTOM != 0 {
        debug_assert!(dy != 0.0);
        Point::new(p1.x + dx * (clip.y_min - p1.y) / dy, clip.y_min)
    } else if region & REGION_RIGHT != 0 {
        debug_assert!(dx != 0.0);
        Point::new(clip.x_max, p1.y + dy * (clip.x_max - p1.x) / dx)
    } else {
        debug_assert!(region & REGION_LEFT != 0 && dx != 0.0);
        Point::new(clip.x_min, p1.y + dy * (clip.x_min - p1.x) / dx)
    }
}

// =============================================================
// Bresenham line drawing
// =============================================================

/// Draw `line` one pixel wide after clipping it to the framebuffer.
///
/// # Panics
///
/// Panics if the framebuffer has zero area: the stepping loop always writes
/// at least one pixel.
pub fn draw_line(fb: &mut Framebuffer, line: &Line, color: Color) {
    assert!(!fb.is_empty(), "draw_line on a zero-area framebuffer");

    let max_x = fb.width() - 1;
    let max_y = fb.height() - 1;
    let clip = ClipRect::new(0.0, 0.0, f64::from(max_x), f64::from(max_y));
    let Some(clipped) = clip_line(*line, &clip) else {
        return;
    };

    let mut x1 = clipped.p1.x as i64;
    let mut y1 = clipped.p1.y as i64;
    let mut x2 = clipped.p2.x as i64;
    let mut y2 = clipped.p2.y as i64;
    for (v, max) in [(x1, max_x), (x2, max_x), (y1, max_y), (y2, max_y)] {
        debug_assert!((0..=i64::from(max)).contains(&v), "clipped coordinate {v} outside 0..={max}");
    }

    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let dx = x2 - x1;
    let mut dy = y2 - y1;
    let step_y = if dy < 0 {
        dy = -dy;
        -1
    } else {
        1
    };

    let mut put = |x: i64, y: i64| fb.put_pixel(x as u32, y as u32, color);

    let mut error = 0;
    if dx >= dy {
        let mut y = y1;
        for x in x1..=x2 {
            put(x, y);
            error += dy;
            if error << 1 >= dx {
                y += step_y;
                error -= dx;
            }
        }
    } else {
        let mut x = x1;
        let mut y = y1;
        for _ in 0..=dy {
            put(x, y);
            y += step_y;
            error += dx;
            if error << 1 >= dy {
                x += 1;
                error -= dy;
            }
        }
    }
}
