//! Rendering: maps scene items to drawable primitives and walks them into a
//! drawing surface.
//!
//! The mapping ([`render_items`]) is pure: it reads items and config and
//! returns a display list. The [`Surface`] trait is the only seam to an
//! actual drawing backend. The browser implementation lives in
//! [`crate::web::CanvasSurface`]; [`Recorder`] keeps calls in memory.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::config::EditorConfig;
use crate::consts::{DEFAULT_CIRCLE_RADIUS, DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH};
use crate::reconcile::Frame;
use crate::scene::{CircleItem, ItemId, PropMap, Props, RectangleItem, SceneItem};

/// A 24-bit RGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }

    /// CSS `rgba()` string with the given opacity.
    #[must_use]
    pub fn to_css(self, alpha: f64) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}

/// One step of a graphics node's draw routine.
///
/// Fill and line style apply to the shapes that follow until `EndFill`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Discard whatever this node drew before.
    Clear,
    LineStyle { width: f64, color: Color, alpha: f64 },
    BeginFill { color: Color, alpha: f64 },
    /// Axis-aligned rectangle; `width` / `height` may be negative.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64 },
    EndFill,
}

/// A drawable node produced from a scene item.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text { id: ItemId, text: String, at: Point, props: PropMap },
    Group { id: ItemId, at: Point, children: Vec<Primitive>, props: PropMap },
    Sprite { id: ItemId, texture: Option<String>, at: Point, size: Option<(f64, f64)>, props: PropMap },
    Graphics { id: ItemId, commands: Vec<DrawCommand>, props: PropMap },
}

impl Primitive {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Text { id, .. } | Self::Group { id, .. } | Self::Sprite { id, .. } | Self::Graphics { id, .. } => id,
        }
    }
}

/// Drawing backend for a frame.
///
/// Coordinates handed to the surface are in world space; the surface applies
/// the camera transform given to [`Surface::begin_frame`].
pub trait Surface {
    type Error;

    /// Reset the target and install the camera transform.
    fn begin_frame(&mut self, camera: &Camera) -> Result<(), Self::Error>;

    fn text(&mut self, text: &str, at: Point, props: &PropMap) -> Result<(), Self::Error>;

    /// Start a group; subsequent calls are offset by `at` until `pop_group`.
    fn push_group(&mut self, at: Point, props: &PropMap) -> Result<(), Self::Error>;

    fn pop_group(&mut self) -> Result<(), Self::Error>;

    fn sprite(
        &mut self,
        texture: Option<&str>,
        at: Point,
        size: Option<(f64, f64)>,
        props: &PropMap,
    ) -> Result<(), Self::Error>;

    fn graphics(&mut self, commands: &[DrawCommand], props: &PropMap) -> Result<(), Self::Error>;
}

/// Map scene items to primitives. Unknown and hidden items are skipped.
#[must_use]
pub fn render_items(items: &[SceneItem], config: &EditorConfig) -> Vec<Primitive> {
    items.iter().filter_map(|item| render_item(item, config)).collect()
}

fn render_item(item: &SceneItem, config: &EditorConfig) -> Option<Primitive> {
    match item {
        SceneItem::Text(text) => visible(&text.props).then(|| Primitive::Text {
            id: text.id.clone(),
            text: text.text.clone(),
            at: position(text.x, text.y),
            props: text.props.clone(),
        }),
        SceneItem::Container(group) => visible(&group.props).then(|| Primitive::Group {
            id: group.id.clone(),
            at: position(group.x, group.y),
            children: render_items(&group.children, config),
            props: group.props.clone(),
        }),
        SceneItem::Sprite(sprite) => visible(&sprite.props).then(|| Primitive::Sprite {
            id: sprite.id.clone(),
            texture: sprite.texture.clone(),
            at: position(sprite.x, sprite.y),
            size: sprite.width.zip(sprite.height),
            props: sprite.props.clone(),
        }),
        SceneItem::Rectangle(rect) => visible(&rect.props).then(|| Primitive::Graphics {
            id: rect.id.clone(),
            commands: rectangle_commands(rect, config),
            props: rect.props.clone(),
        }),
        SceneItem::Circle(circle) => visible(&circle.props).then(|| Primitive::Graphics {
            id: circle.id.clone(),
            commands: circle_commands(circle, config),
            props: circle.props.clone(),
        }),
        SceneItem::Unknown { .. } => None,
    }
}

fn visible(props: &PropMap) -> bool {
    Props::new(props).visible()
}

fn position(x: Option<f64>, y: Option<f64>) -> Point {
    Point::new(x.unwrap_or(0.0), y.unwrap_or(0.0))
}

fn rectangle_commands(rect: &RectangleItem, config: &EditorConfig) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Clear,
        DrawCommand::BeginFill { color: config.rectangle_fill, alpha: 1.0 },
        DrawCommand::Rect {
            x: rect.x.unwrap_or(0.0),
            y: rect.y.unwrap_or(0.0),
            width: rect.width.unwrap_or(DEFAULT_RECT_WIDTH),
            height: rect.height.unwrap_or(DEFAULT_RECT_HEIGHT),
        },
        DrawCommand::EndFill,
    ]
}

fn circle_commands(circle: &CircleItem, config: &EditorConfig) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Clear,
        DrawCommand::BeginFill { color: config.circle_fill, alpha: 1.0 },
        DrawCommand::Circle {
            x: circle.x.unwrap_or(0.0),
            y: circle.y.unwrap_or(0.0),
            radius: circle.radius.unwrap_or(DEFAULT_CIRCLE_RADIUS),
        },
        DrawCommand::EndFill,
    ]
}

/// Draw a full frame: camera, scene primitives in order, then the overlay on top.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn paint<S: Surface>(surface: &mut S, frame: &Frame) -> Result<(), S::Error> {
    surface.begin_frame(&frame.camera)?;
    for primitive in &frame.primitives {
        paint_primitive(surface, primitive)?;
    }
    surface.graphics(&frame.overlay, &PropMap::new())
}

fn paint_primitive<S: Surface>(surface: &mut S, primitive: &Primitive) -> Result<(), S::Error> {
    match primitive {
        Primitive::Text { text, at, props, .. } => surface.text(text, *at, props),
        Primitive::Group { at, children, props, .. } => {
            surface.push_group(*at, props)?;
            for child in children {
                paint_primitive(surface, child)?;
            }
            surface.pop_group()
        }
        Primitive::Sprite { texture, at, size, props, .. } => surface.sprite(texture.as_deref(), *at, *size, props),
        Primitive::Graphics { commands, props, .. } => surface.graphics(commands, props),
    }
}

/// A surface call captured by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    BeginFrame(Camera),
    Text { text: String, at: Point },
    PushGroup(Point),
    PopGroup,
    Sprite { texture: Option<String>, at: Point, size: Option<(f64, f64)> },
    Graphics(Vec<DrawCommand>),
}

/// In-memory surface that records every call. Never fails.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<SurfaceCall>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls from the most recent frame, starting at its `BeginFrame`.
    #[must_use]
    pub fn last_frame(&self) -> &[SurfaceCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| matches!(call, SurfaceCall::BeginFrame(_)))
            .unwrap_or(0);
        &self.calls[start..]
    }

    /// Number of frames painted so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::BeginFrame(_)))
            .count()
    }
}

impl Surface for Recorder {
    type Error = std::convert::Infallible;

    fn begin_frame(&mut self, camera: &Camera) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::BeginFrame(*camera));
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, _props: &PropMap) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::Text { text: text.to_string(), at });
        Ok(())
    }

    fn push_group(&mut self, at: Point, _props: &PropMap) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::PushGroup(at));
        Ok(())
    }

    fn pop_group(&mut self) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::PopGroup);
        Ok(())
    }

    fn sprite(
        &mut self,
        texture: Option<&str>,
        at: Point,
        size: Option<(f64, f64)>,
        _props: &PropMap,
    ) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::Sprite { texture: texture.map(str::to_string), at, size });
        Ok(())
    }

    fn graphics(&mut self, commands: &[DrawCommand], _props: &PropMap) -> Result<(), Self::Error> {
        self.calls.push(SurfaceCall::Graphics(commands.to_vec()));
        Ok(())
    }
}
