//! Marquee overlay: the translucent rectangle shown while selecting.
//!
//! The overlay is a single graphics node owned by the engine for its whole
//! lifetime. It is redrawn from the current [`SelectionRect`] on every change
//! and reduced to a bare `Clear` when the gesture ends.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::config::SelectionStyle;
use crate::input::SelectionRect;
use crate::render::DrawCommand;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    style: SelectionStyle,
    commands: Vec<DrawCommand>,
}

impl SelectionOverlay {
    #[must_use]
    pub fn new(style: SelectionStyle) -> Self {
        Self { style, commands: vec![DrawCommand::Clear] }
    }

    /// Replace the drawing with an outline and fill spanning `rect`.
    ///
    /// Negative extents are kept as-is.
    pub fn redraw(&mut self, rect: &SelectionRect) {
        let style = self.style;
        self.commands = vec![
            DrawCommand::Clear,
            DrawCommand::LineStyle { width: style.stroke_width, color: style.color, alpha: style.stroke_alpha },
            DrawCommand::BeginFill { color: style.color, alpha: style.fill_alpha },
            DrawCommand::Rect { x: rect.start.x, y: rect.start.y, width: rect.width(), height: rect.height() },
            DrawCommand::EndFill,
        ];
    }

    pub fn clear(&mut self) {
        self.commands = vec![DrawCommand::Clear];
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.commands.len() == 1
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
