#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Camera state for pan/zoom over the scene.
///
/// `x` / `y` are the screen position of the world origin in CSS pixels.
/// `scale` is a uniform zoom factor (1.0 = no zoom), always inside
/// `[min_zoom, max_zoom]`. `screen_width` / `screen_height` are the size of
/// the visible area and only matter for center-based operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub screen_width: f64,
    pub screen_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            screen_width: 0.0,
            screen_height: 0.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Camera with identity transform and the given zoom limits.
    #[must_use]
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        Self { min_zoom, max_zoom, ..Self::default() }
    }

    /// Screen position of the world origin.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Clamp a scale into this camera's zoom limits.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// World point shown at the middle of the screen.
    #[must_use]
    pub fn center(&self) -> Point {
        self.screen_to_world(Point::new(self.screen_width / 2.0, self.screen_height / 2.0))
    }

    /// Reposition the camera so `world` sits at the middle of the screen.
    pub fn move_center(&mut self, world: Point) {
        self.x = self.screen_width / 2.0 - world.x * self.scale;
        self.y = self.screen_height / 2.0 - world.y * self.scale;
    }

    /// Set the scale (clamped). With `keep_center` the world point at the
    /// middle of the screen stays put; otherwise the world origin does.
    pub fn set_zoom(&mut self, scale: f64, keep_center: bool) {
        let center = self.center();
        self.scale = self.clamp_scale(scale);
        if keep_center {
            self.move_center(center);
        }
    }

    /// Zoom to `target_scale` (clamped) keeping the world point under
    /// `anchor` fixed on screen.
    pub fn apply_zoom(&mut self, target_scale: f64, anchor: Point) {
        let before = self.screen_to_world(anchor);
        self.set_zoom(target_scale, true);
        let after = self.screen_to_world(anchor);
        let center = self.center();
        self.move_center(center + (before - after));
    }

    /// Translate by a raw screen-space delta. Not adjusted for scale.
    pub fn pan_by(&mut self, delta_screen: Point) {
        self.x += delta_screen.x;
        self.y += delta_screen.y;
    }

    /// Move the visible center by a delta in world units.
    pub fn pan_by_world_delta(&mut self, delta_world: Point) {
        let center = self.center();
        self.move_center(center + delta_world);
    }
}
