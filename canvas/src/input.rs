//! Interaction model: the pan/zoom mode machine and selection state.
//!
//! The platform layer turns key presses into mode changes through the
//! session's entry points. `InteractionMode` is the active mode, carrying the
//! cursor anchor each tick measures its delta from. `UiState` holds the
//! selection and the one-shot pick request.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::viewport::Point;

/// Which interaction is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    /// No drag in progress; pick requests are serviced here.
    #[default]
    Default,
    /// Cursor motion moves the viewport.
    Panning {
        /// Cursor pixel position at the previous tick.
        last_cursor: Point,
    },
    /// Vertical cursor motion scales the viewport about its center.
    Zooming {
        /// Cursor pixel y at the previous tick.
        last_y: f64,
    },
}

impl InteractionMode {
    /// Short uppercase label for status display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Panning { .. } => "PAN",
            Self::Zooming { .. } => "ZOOM",
        }
    }
}

/// Selection state visible to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Index of the selected shape, if any.
    pub selected: Option<usize>,
    /// A pick is waiting for the next tick spent in [`InteractionMode::Default`].
    pub pick_requested: bool,
}
