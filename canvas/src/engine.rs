use crate::config::{ConfigError, SessionConfig};
use crate::framebuffer::{Color, Framebuffer};
use crate::glyph::{Font, FontError};
use crate::hit;
use crate::input::{InteractionMode, UiState};
use crate::render::{self, Scene};
use crate::scene::{ShapeStore, StoreError};
use crate::viewport::{Line, Point, Rect, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// State changes reported by [`Session::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A pick finished; carries the new selection.
    SelectionChanged(Option<usize>),
    /// Panning or zooming moved the viewport.
    ViewportChanged(Viewport),
    /// The scene must be redrawn before the next present.
    RenderNeeded,
}

/// Failure to start a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("font: {0}")]
    Font(#[from] FontError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Everything the core owns for the lifetime of the application.
///
/// Created once at start-up and dropped at shutdown. The framebuffer is not
/// part of the session: it is borrowed for the duration of each
/// [`Session::tick`] or [`Session::render`] call.
#[derive(Debug)]
pub struct Session {
    store: ShapeStore,
    viewport: Viewport,
    font: Font,
    ui: UiState,
    mode: InteractionMode,
    config: SessionConfig,
    canvas_width: u32,
    canvas_height: u32,
    dirty: bool,
}

impl Session {
    /// Start a session with the built-in bitmap font.
    ///
    /// # Errors
    ///
    /// [`SessionError::Config`] for an unusable config, [`SessionError::Font`]
    /// if the font table cannot be allocated.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let font = Font::builtin()?;
        Self::with_font(config, font)
    }

    /// Start a session with a font built elsewhere.
    ///
    /// # Errors
    ///
    /// [`SessionError::Config`] for an unusable config.
    pub fn with_font(config: SessionConfig, font: Font) -> Result<Self, SessionError> {
        config.validate()?;
        tracing::info!(
            capacity = config.shape_capacity,
            viewport_size = config.viewport.size,
            "session created"
        );
        Ok(Self {
            store: ShapeStore::new(config.shape_capacity),
            viewport: config.viewport,
            font,
            ui: UiState::default(),
            mode: InteractionMode::Default,
            config,
            canvas_width: 0,
            canvas_height: 0,
            dirty: true,
        })
    }

    // --- Shape authoring ---

    /// Append a world-space rectangle on top of the scene.
    ///
    /// # Errors
    ///
    /// [`StoreError::Full`] once the configured capacity is reached.
    pub fn add_rectangle(&mut self, rect: Rect, color: Color) -> Result<usize, StoreError> {
        let index = self.store.add_rectangle(rect, color)?;
        self.dirty = true;
        Ok(index)
    }

    /// Append a world-space line segment on top of the scene.
    ///
    /// # Errors
    ///
    /// [`StoreError::Full`] once the configured capacity is reached.
    pub fn add_line(&mut self, line: Line, color: Color) -> Result<usize, StoreError> {
        let index = self.store.add_line(line, color)?;
        self.dirty = true;
        Ok(index)
    }

    // --- Input entry points ---

    /// Start panning; `cursor` is the pixel position the first delta is measured from.
    pub fn begin_pan(&mut self, cursor: Point) {
        tracing::debug!(x = cursor.x, y = cursor.y, "begin pan");
        self.mode = InteractionMode::Panning { last_cursor: cursor };
        self.dirty = true;
    }

    /// Start zooming; `cursor` is the pixel position the first delta is measured from.
    pub fn begin_zoom(&mut self, cursor: Point) {
        tracing::debug!(y = cursor.y, "begin zoom");
        self.mode = InteractionMode::Zooming { last_y: cursor.y };
        self.dirty = true;
    }

    /// Return to [`InteractionMode::Default`].
    pub fn end_interaction(&mut self) {
        if self.mode != InteractionMode::Default {
            tracing::debug!(from = self.mode.label(), "end interaction");
            self.mode = InteractionMode::Default;
            self.dirty = true;
        }
    }

    /// Ask for a pick at the cursor on the next tick spent in the default mode.
    pub fn request_pick(&mut self) {
        self.ui.pick_requested = true;
    }

    /// Force a redraw on the next tick (window exposed, contents lost).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    // --- Per-tick update ---

    /// Advance the interaction state by one tick.
    ///
    /// `canvas_width` × `canvas_height` is the current framebuffer size and
    /// `cursor` the cursor position in its pixel space. Returns what changed;
    /// the list ends with [`Action::RenderNeeded`] whenever a redraw is due.
    pub fn update(&mut self, canvas_width: u32, canvas_height: u32, cursor: Point) -> Vec<Action> {
        let mut actions = Vec::new();

        if (canvas_width, canvas_height) != (self.canvas_width, self.canvas_height) {
            self.canvas_width = canvas_width;
            self.canvas_height = canvas_height;
            self.dirty = true;
        }

        // Without rows there is no pixel scale to convert cursor motion with.
        if canvas_height > 0 {
            match self.mode {
                InteractionMode::Default => {
                    if self.ui.pick_requested {
                        self.ui.pick_requested = false;
                        self.pick(cursor, &mut actions);
                    }
                }
                InteractionMode::Panning { last_cursor } => {
                    self.pan(last_cursor, cursor, &mut actions);
                    self.mode = InteractionMode::Panning { last_cursor: cursor };
                }
                InteractionMode::Zooming { last_y } => {
                    self.zoom(last_y - cursor.y, &mut actions);
                    self.mode = InteractionMode::Zooming { last_y: cursor.y };
                }
            }
        }

        if self.dirty {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn pick(&mut self, cursor: Point, actions: &mut Vec<Action>) {
        let world = self.viewport.pixel_to_world(cursor, self.canvas_height);
        let ppu = self.viewport.pixels_per_unit(self.canvas_height);
        let hit = hit::hit_test(world, &self.store, ppu, self.config.pick_radius_px);
        tracing::debug!(x = world.x, y = world.y, ?hit, "pick");

        if hit != self.ui.selected {
            self.ui.selected = hit;
            self.dirty = true;
            actions.push(Action::SelectionChanged(hit));
        }
    }

    fn pan(&mut self, anchor: Point, cursor: Point, actions: &mut Vec<Action>) {
        let delta = anchor - cursor;
        if delta == Point::default() {
            return;
        }
        self.viewport.min = self.viewport.min + delta * self.viewport.units_per_pixel(self.canvas_height);
        self.dirty = true;
        actions.push(Action::ViewportChanged(self.viewport));
    }

    fn zoom(&mut self, dy: f64, actions: &mut Vec<Action>) {
        if dy == 0.0 {
            return;
        }
        let old_size = self.viewport.size;
        let new_size = (old_size * (1.0 + self.config.zoom_speed * dy))
            .clamp(self.config.min_viewport_size, self.config.max_viewport_size);
        if new_size == old_size {
            return;
        }

        // Keep the view centre fixed.
        let shift = (new_size - old_size) * 0.5;
        self.viewport.min = self.viewport.min - Point::new(shift, shift);
        self.viewport.size = new_size;
        self.dirty = true;
        tracing::debug!(size = new_size, "zoom");
        actions.push(Action::ViewportChanged(self.viewport));
    }

    /// Update, then redraw into `fb` if anything changed.
    ///
    /// Returns `true` when the framebuffer was redrawn and should be presented.
    pub fn tick(&mut self, fb: &mut Framebuffer, cursor: Point) -> bool {
        let actions = self.update(fb.width(), fb.height(), cursor);
        if !actions.contains(&Action::RenderNeeded) || fb.is_empty() {
            return false;
        }
        self.render(fb);
        self.dirty = false;
        true
    }

    /// Draw the current state into `fb` unconditionally.
    pub fn render(&self, fb: &mut Framebuffer) {
        render::draw(fb, &self.scene());
    }

    // --- Queries ---

    fn scene(&self) -> Scene<'_> {
        Scene {
            store: &self.store,
            viewport: &self.viewport,
            ui: &self.ui,
            mode: &self.mode,
            font: &self.font,
            config: &self.config,
        }
    }

    /// The currently selected shape index, if any.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.ui.selected
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn shapes(&self) -> &ShapeStore {
        &self.store
    }

    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True when the next tick will redraw.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
