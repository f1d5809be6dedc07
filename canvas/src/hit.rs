#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::scene::{Geometry, ShapeStore};
use crate::viewport::{Line, Point};

/// Closest point on `line` to `p`.
///
/// A zero-length segment's only point is its endpoint.
#[must_use]
pub fn closest_point_on_segment(line: &Line, p: Point) -> Point {
    let d = line.p2 - line.p1;
    let len_sq = d.length_sq();
    if len_sq == 0.0 {
        return line.p1;
    }
    let t = ((p - line.p1).dot(d) / len_sq).clamp(0.0, 1.0);
    line.p1 + d * t
}

/// Squared world-space distance from `p` to `line`.
#[must_use]
pub fn segment_distance_sq(line: &Line, p: Point) -> f64 {
    (p - closest_point_on_segment(line, p)).length_sq()
}

/// Index of the topmost shape under `world_pt`, if any.
///
/// Rectangles hit when the point is inside or on an edge. Lines hit when the
/// point is within `radius_px` screen pixels of the segment, where
/// `pixels_per_unit` converts world distances to pixels.
#[must_use]
pub fn hit_test(world_pt: Point, store: &ShapeStore, pixels_per_unit: f64, radius_px: f64) -> Option<usize> {
    let radius_sq = radius_px * radius_px;
    let scale_sq = pixels_per_unit * pixels_per_unit;

    store
        .iter_topmost_first()
        .find(|(_, shape)| match &shape.geometry {
            Geometry::Rect(rect) => rect.contains(world_pt),
            Geometry::Line(line) => segment_distance_sq(line, world_pt) * scale_sq <= radius_sq,
        })
        .map(|(index, _)| index)
}
