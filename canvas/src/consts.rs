//! Shared numeric constants for the canvas crate.

// ── Pixels ──────────────────────────────────────────────────────

/// Bytes per framebuffer pixel (B, G, R, A).
pub const BYTES_PER_PIXEL: usize = 4;

// ── Interaction ─────────────────────────────────────────────────

/// Pixel radius within which a pick lands on a line segment.
pub const PICK_RADIUS_PX: f64 = 5.0;

/// Fractional viewport growth per pixel of vertical cursor travel while zooming.
pub const ZOOM_SPEED: f64 = 0.005;

/// Smallest world-space viewport size reachable by zooming in.
pub const MIN_VIEWPORT_SIZE: f64 = 1.0e-3;

/// Largest world-space viewport size reachable by zooming out.
pub const MAX_VIEWPORT_SIZE: f64 = 1.0e6;

/// Default number of shapes a session accepts before refusing more.
pub const SHAPE_CAPACITY: usize = 1024;

// ── Clipping ────────────────────────────────────────────────────

/// Upper bound on Cohen–Sutherland endpoint replacements for a single line.
///
/// Exact arithmetic needs at most four; the slack absorbs float rounding.
pub const MAX_CLIP_PASSES: usize = 8;

// ── Selection UI ────────────────────────────────────────────────

/// Side length of the square marker drawn on selected shape points, in pixels.
pub const MARKER_SIZE_PX: f64 = 5.0;

/// Inset of the status text from the left and top framebuffer edges, in pixels.
pub const STATUS_MARGIN_PX: i32 = 4;
