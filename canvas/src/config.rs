//! Session configuration with defaults, JSON loading, and environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{MAX_VIEWPORT_SIZE, MIN_VIEWPORT_SIZE, PICK_RADIUS_PX, SHAPE_CAPACITY, ZOOM_SPEED};
use crate::framebuffer::Color;
use crate::viewport::Viewport;

/// Failure to read configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Tunables for a [`crate::engine::Session`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fractional viewport growth per pixel of vertical cursor travel.
    pub zoom_speed: f64,
    /// Pick tolerance around line segments, in pixels.
    pub pick_radius_px: f64,
    /// Maximum number of shapes.
    pub shape_capacity: usize,
    /// Viewport at session start.
    pub viewport: Viewport,
    pub min_viewport_size: f64,
    pub max_viewport_size: f64,
    pub background: Color,
    pub selection_color: Color,
    pub text_color: Color,
    /// Draw the mode/selection/viewport status lines.
    pub show_status: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom_speed: ZOOM_SPEED,
            pick_radius_px: PICK_RADIUS_PX,
            shape_capacity: SHAPE_CAPACITY,
            viewport: Viewport::default(),
            min_viewport_size: MIN_VIEWPORT_SIZE,
            max_viewport_size: MAX_VIEWPORT_SIZE,
            background: Color::BLACK,
            selection_color: Color::rgb(255, 220, 0),
            text_color: Color::WHITE,
            show_status: true,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed JSON, [`ConfigError::Invalid`] for
    /// values that cannot drive a session.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// See [`SessionConfig::with_env_overrides`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    ///
    /// Optional:
    /// - `CAVEMAN_ZOOM_SPEED`
    /// - `CAVEMAN_PICK_RADIUS_PX`
    /// - `CAVEMAN_SHAPE_CAPACITY`
    /// - `CAVEMAN_SHOW_STATUS` (`true` / `false`)
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidVar`] when a variable is set but does not parse.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })?;
        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env_parse(&lookup, "CAVEMAN_ZOOM_SPEED")? {
            self.zoom_speed = v;
        }
        if let Some(v) = env_parse(&lookup, "CAVEMAN_PICK_RADIUS_PX")? {
            self.pick_radius_px = v;
        }
        if let Some(v) = env_parse(&lookup, "CAVEMAN_SHAPE_CAPACITY")? {
            self.shape_capacity = v;
        }
        if let Some(v) = env_parse(&lookup, "CAVEMAN_SHOW_STATUS")? {
            self.show_status = v;
        }
        self.validate()
    }

    /// Check that the values can drive a session.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_viewport_size, self.max_viewport_size);
        if min.is_nan() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::Invalid(format!("viewport size bounds must satisfy 0 < min <= max, got {min}..{max}")));
        }
        let size = self.viewport.size;
        if size.is_nan() || size < min || size > max {
            return Err(ConfigError::Invalid(format!("viewport size must lie in {min}..={max}, got {size}")));
        }
        if !self.zoom_speed.is_finite() {
            return Err(ConfigError::Invalid(format!("zoom speed must be finite, got {}", self.zoom_speed)));
        }
        if self.pick_radius_px.is_nan() || self.pick_radius_px < 0.0 {
            return Err(ConfigError::Invalid(format!("pick radius must be non-negative, got {}", self.pick_radius_px)));
        }
        Ok(())
    }
}

fn env_parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidVar { var, value }),
    }
}
