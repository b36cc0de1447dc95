//! Input model: modifier keys, mouse buttons, wheel deltas, and the gesture
//! state machine.
//!
//! `Modifiers` captures the keys held at the time of an event and is passed
//! into handlers explicitly. `InputState` is the active gesture tracked
//! between pointer-down and pointer-up, carrying the context needed to
//! compute pan deltas or grow the marquee.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether `key` is among the held modifiers.
    #[must_use]
    pub fn is_held(self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }
}

/// A single modifier key, used to configure wheel behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value. Back/forward buttons map to `None`.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What a wheel event does, decided by the held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAction {
    Zoom,
    PanHorizontal,
    PanVertical,
}

impl WheelAction {
    /// Zoom takes precedence over horizontal pan when both keys are held.
    #[must_use]
    pub fn classify(modifiers: Modifiers, zoom_key: ModifierKey, horizontal_key: ModifierKey) -> Self {
        if modifiers.is_held(zoom_key) {
            Self::Zoom
        } else if modifiers.is_held(horizontal_key) {
            Self::PanHorizontal
        } else {
            Self::PanVertical
        }
    }
}

/// Marquee rectangle in world coordinates.
///
/// `start` is where the drag began and `end` follows the pointer, so the
/// extent is signed: dragging up or left yields negative width or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    /// Zero-area rectangle anchored at `at`.
    #[must_use]
    pub fn at(at: Point) -> Self {
        Self { start: at, end: at }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed on pointer-move
/// and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the view with the middle button.
    Panning {
        /// Screen position of the pointer when the drag began.
        anchor_screen: Point,
        /// Camera position when the drag began.
        anchor_camera: Point,
    },
    /// The user is dragging out a marquee with the primary button.
    MarqueeSelecting {
        /// Current marquee in world coordinates.
        selection: SelectionRect,
    },
}

impl InputState {
    /// The button that started the active gesture, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<Button> {
        match self {
            Self::Idle => None,
            Self::Panning { .. } => Some(Button::Middle),
            Self::MarqueeSelecting { .. } => Some(Button::Primary),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The marquee being dragged, if a selection gesture is active.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        match self {
            Self::MarqueeSelecting { selection } => Some(*selection),
            _ => None,
        }
    }
}
