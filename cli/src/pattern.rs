//! Primitive exercise pattern drawn straight through the raster and glyph API.
//!
//! Covers rectangles clipped at each corner, lines along every edge and
//! between every pair of outer clip regions, lines wholly outside the canvas,
//! and text both in the interior and hanging off each corner.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use canvas::framebuffer::{Color, Framebuffer};
use canvas::glyph::{self, Font};
use canvas::raster;
use canvas::viewport::{Line, Point, Rect};

const BACKGROUND: Color = Color::rgb(255, 127, 0);
const RECT_COLOR: Color = Color::rgb(0, 0, 255);
const EDGE_COLOR: Color = Color::rgb(255, 128, 0);
const CROSS_COLOR: Color = Color::rgb(128, 0, 255);
const TEXT_COLOR: Color = Color::WHITE;

const SAMPLE_TEXT: [&str; 5] = [
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    r#"`~!@#$%^&*()_-+={[}]:;"'<,>.?/"#,
    "The quick brown fox jumped over the lazy dog",
];

/// Draw the full pattern into `fb`. A zero-area framebuffer is left alone.
pub fn draw(fb: &mut Framebuffer, font: &Font) {
    if fb.is_empty() {
        return;
    }
    raster::clear(fb, BACKGROUND);
    corner_rects(fb);
    edge_lines(fb);
    cross_region_lines(fb);
    outside_lines(fb);
    text(fb, font);
}

fn corner_rects(fb: &mut Framebuffer) {
    let (w, h) = (f64::from(fb.width()), f64::from(fb.height()));
    let size = 100.0;
    for (x, y) in [(-50.0, -50.0), (-50.0, h - 50.0), (w - 50.0, h - 50.0), (w - 50.0, -50.0)] {
        raster::fill_rect(fb, &Rect::new(x, y, size, size), RECT_COLOR);
    }
    raster::fill_rect(fb, &Rect::new(0.0, 0.0, 0.0, 0.0), RECT_COLOR);
}

fn edge_lines(fb: &mut Framebuffer) {
    let (r, t) = (f64::from(fb.width() - 1), f64::from(fb.height() - 1));
    let segments = [
        ((0.0, 0.0), (r, t)),
        ((0.0, t), (r, 0.0)),
        ((0.0, 0.0), (0.0, t)),
        ((r, 0.0), (r, t)),
        ((0.0, 0.0), (r, 0.0)),
        ((0.0, t), (r, t)),
    ];
    for ((x1, y1), (x2, y2)) in segments {
        raster::draw_line(fb, &Line::new(Point::new(x1, y1), Point::new(x2, y2)), EDGE_COLOR);
    }
}

/// The canvas centre and the eight points 50 px outside it, one per outer region.
fn region_points(fb: &Framebuffer) -> [Point; 9] {
    let (w, h) = (f64::from(fb.width()), f64::from(fb.height()));
    let (cx, cy) = (f64::from(fb.width() >> 1), f64::from(fb.height() >> 1));
    let mut points = [Point::default(); 9];
    for (i, x) in [-50.0, cx, w + 50.0].into_iter().enumerate() {
        for (j, y) in [-50.0, cy, h + 50.0].into_iter().enumerate() {
            points[i * 3 + j] = Point::new(x, y);
        }
    }
    points
}

fn cross_region_lines(fb: &mut Framebuffer) {
    let points = region_points(fb);
    for (i, &p1) in points.iter().enumerate() {
        for (j, &p2) in points.iter().enumerate() {
            if i != j {
                raster::draw_line(fb, &Line::new(p1, p2), CROSS_COLOR);
            }
        }
    }
}

/// Lines that never touch the canvas, one per outer region, plus a zero-length line.
fn outside_lines(fb: &mut Framebuffer) {
    let (w, h) = (f64::from(fb.width()), f64::from(fb.height()));
    let (cx, cy) = (f64::from(fb.width() >> 1), f64::from(fb.height() >> 1));
    let segments = [
        ((-10.0, -10.0), (-20.0, -20.0)),
        ((-10.0, cy), (-20.0, cy)),
        ((-10.0, h + 10.0), (-20.0, h + 20.0)),
        ((w, h + 10.0), (w, h + 20.0)),
        ((w + 10.0, h + 10.0), (w + 20.0, h + 20.0)),
        ((w + 10.0, cy), (w + 20.0, cy)),
        ((w + 10.0, -10.0), (w + 20.0, -20.0)),
        ((cx, -10.0), (cx, -20.0)),
        ((0.0, 0.0), (0.0, 0.0)),
    ];
    for ((x1, y1), (x2, y2)) in segments {
        raster::draw_line(fb, &Line::new(Point::new(x1, y1), Point::new(x2, y2)), CROSS_COLOR);
    }
}

fn text(fb: &mut Framebuffer, font: &Font) {
    let mut baseline = fb.height() as i32 - 20;
    for line in SAMPLE_TEXT {
        glyph::draw_text(font, fb, line.as_bytes(), 10, baseline, TEXT_COLOR);
        baseline -= font.line_advance();
    }

    let (right, top) = (fb.width() as i32 - 5, fb.height() as i32 - 5);
    for (x, y) in [(-5, -5), (-5, top), (right, -5), (right, top)] {
        glyph::draw_text(font, fb, b"A", x, y, TEXT_COLOR);
    }
}
