//! Immediate-mode 2D software rasterizer with an interactive viewport.
//!
//! This crate draws filled rectangles, clipped line segments, and
//! alpha-blended bitmap text straight into an in-memory BGRA framebuffer, and
//! lets the user pan, zoom, and pick shapes in a world-space scene. The host
//! platform layer owns the window and the framebuffer memory; it forwards
//! input to a [`engine::Session`] and calls [`engine::Session::tick`] once per
//! frame, presenting the framebuffer whenever a tick reports a redraw.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session lifecycle, input entry points, per-tick update |
//! | [`scene`] | Shape types and the z-ordered shape store |
//! | [`viewport`] | Points, rectangles, lines, and world↔pixel mapping |
//! | [`input`] | Interaction modes and selection state |
//! | [`hit`] | Hit-testing against shapes |
//! | [`render`] | Scene drawing: shapes, selection markers, status text |
//! | [`raster`] | Clear, rectangle fill, Cohen–Sutherland clip, Bresenham lines |
//! | [`glyph`] | Coverage fonts and alpha-blended text |
//! | [`framebuffer`] | Colors and pitch-aware pixel memory |
//! | [`config`] | Session configuration |
//! | [`consts`] | Shared numeric constants (pick radius, zoom speed, etc.) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod framebuffer;
pub mod glyph;
pub mod hit;
pub mod input;
pub mod raster;
pub mod render;
pub mod scene;
pub mod viewport;
