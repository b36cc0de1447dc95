//! Editor configuration parsed from the host's JSON.
//!
//! Every field has a default, so an empty object (or no config at all) yields
//! the stock editor: zoom in `[0.1, 5.0]` by steps of `0.1`, Ctrl for zoom,
//! Shift for horizontal scrolling.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CIRCLE_FILL, MAX_ZOOM, MIN_ZOOM, RECT_FILL, SELECTION_COLOR, SELECTION_FILL_ALPHA, SELECTION_STROKE_ALPHA,
    SELECTION_STROKE_WIDTH, ZOOM_STEP,
};
use crate::input::ModifierKey;
use crate::render::Color;

/// Errors raised while loading or validating an [`EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config JSON could not be parsed.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Zoom limits are non-positive, non-finite or inverted.
    #[error("invalid zoom range [{min}, {max}]")]
    InvalidZoomRange { min: f64, max: f64 },
    /// Zoom step is non-positive or non-finite.
    #[error("invalid zoom step {0}")]
    InvalidZoomStep(f64),
    /// The same modifier is bound to both wheel actions.
    #[error("modifier {0:?} bound to both zoom and horizontal pan")]
    ConflictingModifiers(ModifierKey),
}

/// Which modifier keys change the meaning of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelBindings {
    /// Held to zoom about the cursor.
    pub zoom: ModifierKey,
    /// Held to scroll horizontally.
    pub horizontal_pan: ModifierKey,
}

impl Default for WheelBindings {
    fn default() -> Self {
        Self { zoom: ModifierKey::Ctrl, horizontal_pan: ModifierKey::Shift }
    }
}

/// Appearance of the marquee overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub stroke_alpha: f64,
    pub fill_alpha: f64,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            color: Color(SELECTION_COLOR),
            stroke_width: SELECTION_STROKE_WIDTH,
            stroke_alpha: SELECTION_STROKE_ALPHA,
            fill_alpha: SELECTION_FILL_ALPHA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Scale change per wheel notch while zooming.
    pub zoom_step: f64,
    pub rectangle_fill: Color,
    pub circle_fill: Color,
    pub selection: SelectionStyle,
    pub wheel: WheelBindings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            rectangle_fill: Color(RECT_FILL),
            circle_fill: Color(CIRCLE_FILL),
            selection: SelectionStyle::default(),
            wheel: WheelBindings::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the first
    /// validation failure reported by [`EditorConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the zoom range, zoom step and wheel bindings are usable.
    ///
    /// # Errors
    ///
    /// Returns the first invariant the config violates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range_ok = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom;
        if !range_ok {
            return Err(ConfigError::InvalidZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        if self.wheel.zoom == self.wheel.horizontal_pan {
            return Err(ConfigError::ConflictingModifiers(self.wheel.zoom));
        }
        Ok(())
    }
}
