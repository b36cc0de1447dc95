//! Browser host: the `wasm-bindgen` editor component and its canvas surface.
//!
//! This module is the only place that touches `web_sys`. [`CanvasSurface`]
//! draws frames to a [`CanvasRenderingContext2d`]; [`Editor`] owns the engine,
//! converts DOM pointer/wheel events into engine inputs, and carries out the
//! returned [`Action`]s (cursor changes, `preventDefault`, render requests).
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, PointerEvent, WheelEvent,
};

use crate::camera::{Camera, Point};
use crate::config::EditorConfig;
use crate::engine::{Action, Cursor, Engine};
use crate::input::{Button, Modifiers, SelectionRect, WheelDelta};
use crate::render::{DrawCommand, Surface};
use crate::scene::{PropMap, Props, SceneItem};

/// Install the panic hook and browser logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger already installed: {err}");
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// =============================================================
// Surface
// =============================================================

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    dpr: f64,
    textures: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    /// Acquire the `2d` context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, dpr: 1.0, textures: HashMap::new() })
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// Make `image` available to sprites whose `texture` is `name`.
    pub fn register_texture(&mut self, name: String, image: HtmlImageElement) {
        self.textures.insert(name, image);
    }

    fn fill_and_stroke(&self, fill: Option<&str>, line: Option<&(f64, String)>) {
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }
        if let Some((width, stroke)) = line {
            self.ctx.set_line_width(*width);
            self.ctx.set_stroke_style_str(stroke);
            self.ctx.stroke();
        }
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn begin_frame(&mut self, camera: &Camera) -> Result<(), JsValue> {
        self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, camera.screen_width, camera.screen_height);
        self.ctx.translate(camera.x, camera.y)?;
        self.ctx.scale(camera.scale, camera.scale)?;
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, props: &PropMap) -> Result<(), JsValue> {
        let props = Props::new(props);
        self.ctx.save();
        self.ctx.set_global_alpha(self.ctx.global_alpha() * props.alpha());
        self.ctx.set_font(&format!("{}px {}", props.font_size(), props.font_family()));
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(props.fill());
        self.ctx.fill_text(text, at.x, at.y)?;
        self.ctx.restore();
        Ok(())
    }

    fn push_group(&mut self, at: Point, props: &PropMap) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.translate(at.x, at.y)?;
        self.ctx.set_global_alpha(self.ctx.global_alpha() * Props::new(props).alpha());
        Ok(())
    }

    fn pop_group(&mut self) -> Result<(), JsValue> {
        self.ctx.restore();
        Ok(())
    }

    fn sprite(
        &mut self,
        texture: Option<&str>,
        at: Point,
        size: Option<(f64, f64)>,
        props: &PropMap,
    ) -> Result<(), JsValue> {
        let Some(image) = texture.and_then(|name| self.textures.get(name)) else {
            return Ok(());
        };
        self.ctx.save();
        self.ctx.set_global_alpha(self.ctx.global_alpha() * Props::new(props).alpha());
        match size {
            Some((w, h)) => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(image, at.x, at.y, w, h)?,
            None => self.ctx.draw_image_with_html_image_element(image, at.x, at.y)?,
        }
        self.ctx.restore();
        Ok(())
    }

    fn graphics(&mut self, commands: &[DrawCommand], props: &PropMap) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.set_global_alpha(self.ctx.global_alpha() * Props::new(props).alpha());
        let mut fill: Option<String> = None;
        let mut line: Option<(f64, String)> = None;
        for command in commands {
            match *command {
                // The whole canvas is cleared in `begin_frame`.
                DrawCommand::Clear => {
                    fill = None;
                    line = None;
                }
                DrawCommand::LineStyle { width, color, alpha } => line = Some((width, color.to_css(alpha))),
                DrawCommand::BeginFill { color, alpha } => fill = Some(color.to_css(alpha)),
                DrawCommand::Rect { x, y, width, height } => {
                    self.ctx.begin_path();
                    self.ctx.rect(x, y, width, height);
                    self.fill_and_stroke(fill.as_deref(), line.as_ref());
                }
                DrawCommand::Circle { x, y, radius } => {
                    self.ctx.begin_path();
                    self.ctx.arc(x, y, radius, 0.0, TAU)?;
                    self.fill_and_stroke(fill.as_deref(), line.as_ref());
                }
                DrawCommand::EndFill => fill = None,
            }
        }
        self.ctx.restore();
        Ok(())
    }
}

// =============================================================
// Editor component
// =============================================================

fn pointer_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

fn modifiers(ev: &MouseEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

/// Editor component exposed to the host page.
///
/// The host forwards DOM events from the canvas and calls [`Editor::render`]
/// once per animation frame; unchanged frames are skipped.
#[wasm_bindgen]
pub struct Editor {
    canvas: HtmlCanvasElement,
    engine: Engine<CanvasSurface>,
    completed: Option<SelectionRect>,
}

#[wasm_bindgen]
impl Editor {
    /// Mount an editor on `canvas`. `config_json` may be omitted for defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an invalid config or a canvas without a 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Editor, JsValue> {
        let config = match config_json {
            Some(raw) => EditorConfig::from_json(&raw).map_err(js_error)?,
            None => EditorConfig::default(),
        };
        let surface = CanvasSurface::from_canvas(&canvas)?;
        let mut engine = Engine::new(surface, config).map_err(js_error)?;
        engine.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        log::debug!("editor mounted with {config:?}");
        Ok(Self { canvas, engine, completed: None })
    }

    /// Replace the scene with a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns `Err` for malformed JSON or duplicate ids; the old scene stays.
    pub fn set_items(&mut self, items_json: &str) -> Result<(), JsValue> {
        let items: Vec<SceneItem> = serde_json::from_str(items_json).map_err(|err| {
            log::warn!("rejected scene items: {err}");
            js_error(err)
        })?;
        let action = self.engine.set_items(items).map_err(|err| {
            log::warn!("rejected scene items: {err}");
            js_error(err)
        })?;
        self.apply(vec![action], None)
    }

    /// Resize the backing store to `width_css` × `height_css` at `dpr`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if carrying out the resulting actions fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Result<(), JsValue> {
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
        self.engine.surface_mut().set_dpr(dpr);
        self.engine.invalidate();
        let action = self.engine.set_viewport(width_css, height_css);
        self.apply(vec![action], None)
    }

    pub fn register_texture(&mut self, name: String, image: HtmlImageElement) {
        self.engine.surface_mut().register_texture(name, image);
        self.engine.invalidate();
    }

    /// # Errors
    ///
    /// Returns `Err` if the cursor style cannot be set.
    pub fn pointer_down(&mut self, ev: &PointerEvent) -> Result<(), JsValue> {
        let Some(button) = Button::from_dom(ev.button()) else {
            return Ok(());
        };
        let actions = self.engine.on_pointer_down(pointer_point(ev), button);
        self.apply_event(actions, ev)
    }

    /// # Errors
    ///
    /// Returns `Err` if carrying out the resulting actions fails.
    pub fn pointer_move(&mut self, ev: &PointerEvent) -> Result<(), JsValue> {
        let actions = self.engine.on_pointer_move(pointer_point(ev));
        self.apply_event(actions, ev)
    }

    /// # Errors
    ///
    /// Returns `Err` if the cursor style cannot be reset.
    pub fn pointer_up(&mut self, ev: &PointerEvent) -> Result<(), JsValue> {
        let Some(button) = Button::from_dom(ev.button()) else {
            return Ok(());
        };
        let actions = self.engine.on_pointer_up(pointer_point(ev), button);
        self.apply_event(actions, ev)
    }

    /// Release that happened outside the canvas (bind on `window`).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the cursor style cannot be reset.
    pub fn pointer_up_outside(&mut self, ev: &PointerEvent) -> Result<(), JsValue> {
        let Some(button) = Button::from_dom(ev.button()) else {
            return Ok(());
        };
        let actions = self.engine.on_pointer_up_outside(pointer_point(ev), button);
        self.apply_event(actions, ev)
    }

    /// Bind as a non-passive listener so Ctrl+wheel can suppress page zoom.
    ///
    /// # Errors
    ///
    /// Returns `Err` if carrying out the resulting actions fails.
    pub fn wheel(&mut self, ev: &WheelEvent) -> Result<(), JsValue> {
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        let actions = self.engine.on_wheel(pointer_point(ev), delta, modifiers(ev));
        self.apply_event(actions, ev)
    }

    /// Paint if anything changed since the last paint. Returns whether it painted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<bool, JsValue> {
        let diff = self.engine.render()?;
        Ok(!diff.is_empty())
    }

    /// Whether an event since the last `render` asked for a repaint.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.engine.needs_render()
    }

    /// The last completed marquee as `[start_x, start_y, end_x, end_y]` in
    /// world units, or an empty array. Taking it clears it.
    pub fn take_selection(&mut self) -> Vec<f64> {
        self.completed
            .take()
            .map(|r| vec![r.start.x, r.start.y, r.end.x, r.end.y])
            .unwrap_or_default()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.engine.camera().scale
    }

    #[must_use]
    pub fn camera_x(&self) -> f64 {
        self.engine.camera().x
    }

    #[must_use]
    pub fn camera_y(&self) -> f64 {
        self.engine.camera().y
    }

    /// Abandon any gesture and restore the default cursor.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the cursor style cannot be reset.
    pub fn unmount(&mut self) -> Result<(), JsValue> {
        let actions = self.engine.core.reset_interaction();
        self.apply(actions, None)
    }
}

impl Editor {
    fn apply_event(&mut self, actions: Vec<Action>, ev: &Event) -> Result<(), JsValue> {
        self.apply(actions, Some(ev))
    }

    fn apply(&mut self, actions: Vec<Action>, ev: Option<&Event>) -> Result<(), JsValue> {
        for action in actions {
            match action {
                Action::SetCursor(cursor) => self.set_cursor(cursor)?,
                Action::RenderNeeded => self.engine.mark_dirty(),
                Action::SelectionCompleted(rect) => self.completed = Some(rect),
                Action::PreventDefault => {
                    if let Some(ev) = ev {
                        ev.prevent_default();
                    }
                }
            }
        }
        Ok(())
    }

    fn set_cursor(&self, cursor: Cursor) -> Result<(), JsValue> {
        self.canvas.style().set_property("cursor", cursor.as_css())
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        if let Err(err) = self.set_cursor(Cursor::Default) {
            log::warn!("failed to reset cursor on drop: {err:?}");
        }
    }
}
