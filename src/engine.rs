use crate::camera::{Camera, Point};
use crate::config::{ConfigError, EditorConfig};
use crate::input::{Button, InputState, Modifiers, SelectionRect, WheelAction, WheelDelta};
use crate::overlay::SelectionOverlay;
use crate::reconcile::{self, Frame, FrameDiff};
use crate::render::{self, Surface};
use crate::scene::{Scene, SceneError, SceneItem};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCursor(Cursor),
    RenderNeeded,
    /// A marquee gesture finished. Applying it to items is up to the host.
    SelectionCompleted(SelectionRect),
    /// Suppress the browser's default handling of the event (page zoom).
    PreventDefault,
}

/// Core engine state: all logic that doesn't depend on a drawing surface.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub camera: Camera,
    pub input: InputState,
    pub overlay: SelectionOverlay,
    pub config: EditorConfig,
    pub cursor: Cursor,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a core whose zoom limits, colors and wheel bindings come from `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`EditorConfig::validate`].
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EditorConfig) -> Self {
        Self {
            scene: Scene::default(),
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            input: InputState::default(),
            overlay: SelectionOverlay::new(config.selection),
            config,
            cursor: Cursor::Default,
        }
    }

    // --- Data inputs ---

    /// Replace the scene with a new list of items.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateId`] if ids repeat; the old scene is kept.
    pub fn set_items(&mut self, items: Vec<SceneItem>) -> Result<Action, SceneError> {
        let scene = Scene::new(items)?;
        log::info!("scene loaded: {} items", scene.len());
        self.scene = scene;
        Ok(Action::RenderNeeded)
    }

    /// Update the visible area, in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Action {
        self.camera.set_screen_size(width, height);
        Action::RenderNeeded
    }

    // --- Input events ---

    /// Start a gesture. Ignored while another gesture is active unless the
    /// button is the one that started it, in which case the gesture restarts.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if let Some(active) = self.input.trigger() {
            if active != button {
                log::debug!("pointer-down {button:?} ignored during {active:?} gesture");
                return vec![];
            }
        }

        match button {
            Button::Middle => {
                self.input = InputState::Panning { anchor_screen: screen_pt, anchor_camera: self.camera.position() };
                log::debug!("pan started at {screen_pt:?}");
                self.set_cursor(Cursor::Grabbing).into_iter().collect()
            }
            Button::Primary => {
                let selection = SelectionRect::at(self.camera.screen_to_world(screen_pt));
                self.input = InputState::MarqueeSelecting { selection };
                self.overlay.redraw(&selection);
                log::debug!("marquee started at {:?}", selection.start);
                vec![Action::RenderNeeded]
            }
            Button::Secondary => vec![],
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => vec![],
            InputState::Panning { anchor_screen, anchor_camera } => {
                self.camera.set_position(anchor_camera);
                self.camera.pan_by(screen_pt - anchor_screen);
                vec![Action::RenderNeeded]
            }
            InputState::MarqueeSelecting { mut selection } => {
                selection.end = self.camera.screen_to_world(screen_pt);
                self.input = InputState::MarqueeSelecting { selection };
                self.overlay.redraw(&selection);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the active gesture if `button` started it.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if self.input.trigger() != Some(button) {
            return vec![];
        }

        match std::mem::take(&mut self.input) {
            InputState::Idle => vec![],
            InputState::Panning { .. } => {
                log::debug!("pan ended at camera {:?}", self.camera.position());
                self.set_cursor(Cursor::Default).into_iter().collect()
            }
            InputState::MarqueeSelecting { selection } => {
                self.overlay.clear();
                log::info!("selection area: {:?} -> {:?}", selection.start, selection.end);
                vec![Action::SelectionCompleted(selection), Action::RenderNeeded]
            }
        }
    }

    /// Pointer released outside the canvas. Same as a release inside.
    pub fn on_pointer_up_outside(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.on_pointer_up(screen_pt, button)
    }

    /// Zoom or scroll. Independent of the active gesture.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let bindings = self.config.wheel;
        match WheelAction::classify(modifiers, bindings.zoom, bindings.horizontal_pan) {
            WheelAction::Zoom => {
                let direction = if delta.dy > 0.0 {
                    -1.0
                } else if delta.dy < 0.0 {
                    1.0
                } else {
                    0.0
                };
                let target = self.camera.scale + direction * self.config.zoom_step;
                self.camera.apply_zoom(target, screen_pt);
                vec![Action::PreventDefault, Action::RenderNeeded]
            }
            WheelAction::PanHorizontal => {
                self.camera.pan_by_world_delta(Point::new(delta.dy, 0.0));
                vec![Action::RenderNeeded]
            }
            WheelAction::PanVertical => {
                self.camera.pan_by_world_delta(Point::new(0.0, delta.dy));
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Drop any gesture in progress and restore the default cursor.
    pub fn reset_interaction(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.overlay.clear();
        let mut actions: Vec<Action> = self.set_cursor(Cursor::Default).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor(cursor))
    }

    // --- Queries ---

    /// The marquee currently being dragged, if any.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        self.input.selection()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Build the frame for the next render pass.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            camera: self.camera,
            primitives: render::render_items(self.scene.items(), &self.config),
            overlay: self.overlay.commands().to_vec(),
        }
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the drawing surface.
pub struct Engine<S: Surface> {
    surface: S,
    last_frame: Option<Frame>,
    /// Set by [`Action::RenderNeeded`]; cleared only by a successful render.
    dirty: bool,
    pub core: EngineCore,
}

impl<S: Surface> Engine<S> {
    /// Create a new engine drawing to `surface`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] if `config` is invalid.
    pub fn new(surface: S, config: EditorConfig) -> Result<Self, ConfigError> {
        Ok(Self { surface, last_frame: None, dirty: true, core: EngineCore::with_config(config)? })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // --- Delegated inputs ---

    /// Replace the scene.
    ///
    /// # Errors
    ///
    /// See [`EngineCore::set_items`].
    pub fn set_items(&mut self, items: Vec<SceneItem>) -> Result<Action, SceneError> {
        self.core.set_items(items)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) -> Action {
        self.core.set_viewport(width, height)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_pointer_up_outside(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up_outside(screen_pt, button)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    // --- Render ---

    /// Paint the current state if it differs from the last painted frame.
    ///
    /// # Errors
    ///
    /// Returns the surface's error; the frame is then painted again next time.
    pub fn render(&mut self) -> Result<FrameDiff, S::Error> {
        let frame = self.core.frame();
        let diff = reconcile::diff(self.last_frame.as_ref(), &frame);
        if !diff.is_empty() {
            render::paint(&mut self.surface, &frame)?;
            self.last_frame = Some(frame);
        }
        self.dirty = false;
        Ok(diff)
    }

    /// Force the next `render` to repaint, e.g. after the surface was resized.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
        self.dirty = true;
    }

    /// Record that an input asked for a repaint.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a repaint was requested and has not yet succeeded.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.dirty
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
