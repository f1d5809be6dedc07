#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either world or pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

/// Axis-aligned rectangle given by its minimum corner and extent.
///
/// `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative rectangle extent {width}x{height}");
        Self { min: Point::new(x, y), width, height }
    }

    /// The corner opposite `min`.
    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(self.min.x + self.width, self.min.y + self.height)
    }

    /// Inclusive on all four edges.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// A line segment from `p1` to `p2`; may be degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }
}

/// The square world-space region mapped onto the canvas.
///
/// `size` is both the width and the height of the region; the scale factor is
/// taken from the canvas height alone, so a non-square canvas shows more (or
/// less) world horizontally than `size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min: Point,
    pub size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { min: Point::new(-1.0, -1.0), size: 2.0 }
    }
}

impl Viewport {
    #[must_use]
    pub const fn new(min: Point, size: f64) -> Self {
        Self { min, size }
    }

    /// Pixels per world unit for a canvas `canvas_height` pixels tall.
    #[must_use]
    pub fn pixels_per_unit(&self, canvas_height: u32) -> f64 {
        f64::from(canvas_height) / self.size
    }

    /// World units per pixel for a canvas `canvas_height` pixels tall.
    #[must_use]
    pub fn units_per_pixel(&self, canvas_height: u32) -> f64 {
        self.size / f64::from(canvas_height)
    }

    #[must_use]
    pub fn world_to_pixel(&self, world: Point, canvas_height: u32) -> Point {
        (world - self.min) * self.pixels_per_unit(canvas_height)
    }

    #[must_use]
    pub fn pixel_to_world(&self, pixel: Point, canvas_height: u32) -> Point {
        pixel * self.units_per_pixel(canvas_height) + self.min
    }

    #[must_use]
    pub fn rect_to_pixel(&self, rect: &Rect, canvas_height: u32) -> Rect {
        let scale = self.pixels_per_unit(canvas_height);
        Rect {
            min: self.world_to_pixel(rect.min, canvas_height),
            width: rect.width * scale,
            height: rect.height * scale,
        }
    }

    #[must_use]
    pub fn line_to_pixel(&self, line: &Line, canvas_height: u32) -> Line {
        Line {
            p1: self.world_to_pixel(line.p1, canvas_height),
            p2: self.world_to_pixel(line.p2, canvas_height),
        }
    }
}
