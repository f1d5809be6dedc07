//! Shape model and the ordered store that owns every shape in a session.
//!
//! Index order is draw order: index 0 is drawn first (bottommost) and the last
//! index is drawn last (topmost). The store only grows; shapes are never
//! removed or reordered.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::framebuffer::Color;
use crate::viewport::{Line, Rect};

/// World-space geometry of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    /// Filled axis-aligned rectangle.
    Rect(Rect),
    /// One-pixel-wide line segment.
    Line(Line),
}

/// A colored shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
    pub color: Color,
}

/// Failure to add a shape.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("shape store is full ({capacity} shapes)")]
    Full { capacity: usize },
    #[error("could not grow shape store: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Growth-only, capacity-bounded sequence of shapes in z-order.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    capacity: usize,
}

impl ShapeStore {
    /// Create an empty store that accepts at most `capacity` shapes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { shapes: Vec::new(), capacity }
    }

    /// Append a rectangle on top of everything drawn so far. Returns its index.
    ///
    /// # Errors
    ///
    /// [`StoreError::Full`] once `capacity` shapes are stored.
    pub fn add_rectangle(&mut self, rect: Rect, color: Color) -> Result<usize, StoreError> {
        debug_assert!(rect.width >= 0.0 && rect.height >= 0.0, "negative rectangle extent");
        self.push(Shape { geometry: Geometry::Rect(rect), color })
    }

    /// Append a line segment on top of everything drawn so far. Returns its index.
    ///
    /// # Errors
    ///
    /// [`StoreError::Full`] once `capacity` shapes are stored.
    pub fn add_line(&mut self, line: Line, color: Color) -> Result<usize, StoreError> {
        self.push(Shape { geometry: Geometry::Line(line), color })
    }

    fn push(&mut self, shape: Shape) -> Result<usize, StoreError> {
        if self.shapes.len() >= self.capacity {
            tracing::warn!(capacity = self.capacity, "shape store full; shape refused");
            return Err(StoreError::Full { capacity: self.capacity });
        }
        self.shapes.try_reserve(1)?;
        self.shapes.push(shape);
        Ok(self.shapes.len() - 1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Shapes bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> + ExactSizeIterator {
        self.shapes.iter()
    }

    /// `(index, shape)` pairs top to bottom, the order picks resolve in.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = (usize, &Shape)> {
        self.shapes.iter().enumerate().rev()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Maximum number of shapes this store accepts.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
