//! Rendering: draws the full scene into a framebuffer.
//!
//! This module is the only place that maps shapes from world space to pixel
//! space for drawing. It receives read-only views of session state and
//! produces pixels; it does not mutate any application state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::SessionConfig;
use crate::consts::{MARKER_SIZE_PX, STATUS_MARGIN_PX};
use crate::framebuffer::{Color, Framebuffer};
use crate::glyph::{self, Font};
use crate::input::{InteractionMode, UiState};
use crate::raster;
use crate::scene::{Geometry, Shape, ShapeStore};
use crate::viewport::{Line, Point, Rect, Viewport};

/// Read-only state needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub store: &'a ShapeStore,
    pub viewport: &'a Viewport,
    pub ui: &'a UiState,
    pub mode: &'a InteractionMode,
    pub font: &'a Font,
    pub config: &'a SessionConfig,
}

/// Draw the full scene: background, shapes, selection markers, status text.
///
/// A zero-area framebuffer is left untouched.
pub fn draw(fb: &mut Framebuffer, scene: &Scene<'_>) {
    if fb.is_empty() {
        return;
    }
    let canvas_height = fb.height();

    // Layer 1: background.
    raster::clear(fb, scene.config.background);

    // Layer 2: shapes in z-order (bottom first).
    for shape in scene.store.iter() {
        draw_shape(fb, shape, scene.viewport, canvas_height);
    }

    // Layer 3: selection UI.
    if let Some(shape) = scene.ui.selected.and_then(|i| scene.store.get(i)) {
        draw_selection(fb, shape, scene.viewport, canvas_height, scene.config.selection_color);
    }

    // Layer 4: status text.
    if scene.config.show_status {
        draw_status(fb, scene);
    }

    tracing::trace!(shapes = scene.store.len(), width = fb.width(), height = canvas_height, "frame drawn");
}

fn draw_shape(fb: &mut Framebuffer, shape: &Shape, viewport: &Viewport, canvas_height: u32) {
    match &shape.geometry {
        Geometry::Rect(rect) => {
            raster::fill_rect(fb, &viewport.rect_to_pixel(rect, canvas_height), shape.color);
        }
        Geometry::Line(line) => {
            raster::draw_line(fb, &viewport.line_to_pixel(line, canvas_height), shape.color);
        }
    }
}

// =============================================================
// Selection
// =============================================================

fn draw_selection(fb: &mut Framebuffer, shape: &Shape, viewport: &Viewport, canvas_height: u32, color: Color) {
    match &shape.geometry {
        Geometry::Rect(rect) => {
            let px = viewport.rect_to_pixel(rect, canvas_height);
            let corners = rect_corners(&px);
            for i in 0..corners.len() {
                let edge = Line::new(corners[i], corners[(i + 1) % corners.len()]);
                raster::draw_line(fb, &edge, color);
            }
            for corner in corners {
                draw_marker(fb, corner, color);
            }
        }
        Geometry::Line(line) => {
            let px = viewport.line_to_pixel(line, canvas_height);
            draw_marker(fb, px.p1, color);
            draw_marker(fb, px.p2, color);
        }
    }
}

fn rect_corners(rect: &Rect) -> [Point; 4] {
    let max = rect.max();
    [rect.min, Point::new(max.x, rect.min.y), max, Point::new(rect.min.x, max.y)]
}

/// Small filled square centred on `at`.
fn draw_marker(fb: &mut Framebuffer, at: Point, color: Color) {
    let half = MARKER_SIZE_PX * 0.5;
    let marker = Rect::new(at.x - half, at.y - half, MARKER_SIZE_PX, MARKER_SIZE_PX);
    raster::fill_rect(fb, &marker, color);
}

// =============================================================
// Status text
// =============================================================

/// Status lines, top to bottom.
#[must_use]
pub fn status_lines(scene: &Scene<'_>) -> [String; 2] {
    let selection = match scene.ui.selected {
        Some(i) => format!("#{i}"),
        None => "none".to_owned(),
    };
    let v = scene.viewport;
    [
        format!("{}  shapes: {}  selected: {selection}", scene.mode.label(), scene.store.len()),
        format!("view x:{:.3} y:{:.3} size:{:.3}", v.min.x, v.min.y, v.size),
    ]
}

fn draw_status(fb: &mut Framebuffer, scene: &Scene<'_>) {
    let font = scene.font;
    let mut baseline = fb.height() as i32 - STATUS_MARGIN_PX - font.line_advance();
    for line in status_lines(scene) {
        glyph::draw_text(font, fb, line.as_bytes(), STATUS_MARGIN_PX, baseline, scene.config.text_color);
        baseline -= font.line_advance();
    }
}
