//! Scene model: the items the host asks the editor to draw.
//!
//! Items arrive from the host as JSON, internally tagged by `"type"`. Each
//! kind is its own struct carrying only the geometry relevant to it; any
//! other keys are kept in a pass-through property bag (`props`) for the
//! drawing backend. An unrecognised or missing `"type"` becomes
//! [`SceneItem::Unknown`], which renders nothing but keeps its id.
//!
//! [`Scene`] owns a validated list of top-level items. The renderer reads it
//! through [`Scene::items`]; nothing in the editor mutates it.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Unique identifier for a scene item, chosen by the host.
pub type ItemId = String;

/// Pass-through display properties (fill, font, alpha, ...).
pub type PropMap = serde_json::Map<String, serde_json::Value>;

/// Errors raised while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The items JSON could not be parsed.
    #[error("failed to parse scene items: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two items in the tree share an id.
    #[error("duplicate scene item id: {0}")]
    DuplicateId(ItemId),
}

/// A text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub id: ItemId,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(flatten)]
    pub props: PropMap,
}

/// A group of child items drawn with a shared offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default)]
    pub children: Vec<SceneItem>,
    #[serde(flatten)]
    pub props: PropMap,
}

/// An image drawn from a named texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub props: PropMap,
}

/// A filled rectangle. Missing geometry defaults to `(0, 0, 100, 100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub props: PropMap,
}

/// A filled circle. Missing geometry defaults to center `(0, 0)`, radius 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(flatten)]
    pub props: PropMap,
}

/// One node of the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneItem {
    Text(TextItem),
    Container(ContainerItem),
    Sprite(SpriteItem),
    Rectangle(RectangleItem),
    Circle(CircleItem),
    /// Any `"type"` the editor does not know. Draws nothing, but its id
    /// still counts towards uniqueness.
    Unknown {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<ItemId>,
    },
}

impl<'de> Deserialize<'de> for SceneItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let Value::Object(fields) = &mut value else {
            return Err(D::Error::custom("scene item must be an object"));
        };
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => String::new(),
        };
        let item = match kind.as_str() {
            "text" => serde_json::from_value(value).map(Self::Text),
            "container" => serde_json::from_value(value).map(Self::Container),
            "sprite" => serde_json::from_value(value).map(Self::Sprite),
            "rectangle" => serde_json::from_value(value).map(Self::Rectangle),
            "circle" => serde_json::from_value(value).map(Self::Circle),
            _ => {
                let id = value.get("id").and_then(Value::as_str).map(str::to_string);
                return Ok(Self::Unknown { id });
            }
        };
        item.map_err(D::Error::custom)
    }
}

impl SceneItem {
    /// The item's id. Unknown items may carry none.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Text(item) => Some(&item.id),
            Self::Container(item) => Some(&item.id),
            Self::Sprite(item) => Some(&item.id),
            Self::Rectangle(item) => Some(&item.id),
            Self::Circle(item) => Some(&item.id),
            Self::Unknown { id } => id.as_deref(),
        }
    }

    /// Direct children. Only containers have any.
    #[must_use]
    pub fn children(&self) -> &[SceneItem] {
        match self {
            Self::Container(item) => &item.children,
            _ => &[],
        }
    }
}

/// Typed access to common pass-through properties.
pub struct Props<'a> {
    value: &'a PropMap,
}

impl<'a> Props<'a> {
    #[must_use]
    pub fn new(value: &'a PropMap) -> Self {
        Self { value }
    }

    /// CSS fill color for text. Defaults to `"#000000"` when absent.
    #[must_use]
    pub fn fill(&self) -> &'a str {
        self.value
            .get("fill")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("#000000")
    }

    /// Font size in world units. Defaults to `26.0` when absent.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.value
            .get("fontSize")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(26.0)
    }

    /// Font family. Defaults to `"Arial"` when absent.
    #[must_use]
    pub fn font_family(&self) -> &'a str {
        self.value
            .get("fontFamily")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Arial")
    }

    /// Opacity in `[0, 1]`. Defaults to `1.0` when absent.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.value
            .get("alpha")
            .and_then(serde_json::Value::as_f64)
            .map_or(1.0, |a| a.clamp(0.0, 1.0))
    }

    /// Whether the item is drawn at all. Defaults to `true` when absent.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.value
            .get("visible")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true)
    }
}

/// Depth-first, pre-order walk over an item tree.
pub struct FlatIter<'a> {
    stack: Vec<&'a SceneItem>,
}

impl<'a> Iterator for FlatIter<'a> {
    type Item = &'a SceneItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}

/// Walk `items` and all their descendants in draw order.
#[must_use]
pub fn flatten(items: &[SceneItem]) -> FlatIter<'_> {
    FlatIter { stack: items.iter().rev().collect() }
}

/// Validated list of top-level scene items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    items: Vec<SceneItem>,
}

impl Scene {
    /// Build a scene, checking that ids are unique across the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateId`] naming the first repeated id.
    pub fn new(items: Vec<SceneItem>) -> Result<Self, SceneError> {
        let mut seen = HashSet::new();
        for item in flatten(&items) {
            if let Some(id) = item.id() {
                if !seen.insert(id) {
                    return Err(SceneError::DuplicateId(id.to_string()));
                }
            }
        }
        Ok(Self { items })
    }

    /// Parse a JSON array of items and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Parse`] for malformed JSON or
    /// [`SceneError::DuplicateId`] for repeated ids.
    pub fn from_json(raw: &str) -> Result<Self, SceneError> {
        let items: Vec<SceneItem> = serde_json::from_str(raw)?;
        Self::new(items)
    }

    #[must_use]
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Number of items in the flattened tree.
    #[must_use]
    pub fn len(&self) -> usize {
        flatten(&self.items).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
