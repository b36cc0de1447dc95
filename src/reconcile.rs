//! Frame reconciliation: decide what changed between two render passes.
//!
//! A [`Frame`] is everything needed to paint once: the camera, the scene's
//! primitives, and the overlay commands. The engine keeps the last painted
//! frame and [`diff`]s the next one against it; an empty diff means the
//! surface is already up to date and the paint is skipped.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::collections::HashMap;

use crate::camera::Camera;
use crate::render::{DrawCommand, Primitive};
use crate::scene::ItemId;

/// Snapshot of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub camera: Camera,
    pub primitives: Vec<Primitive>,
    pub overlay: Vec<DrawCommand>,
}

/// Differences between two frames, keyed by top-level primitive id.
///
/// Changes inside a group are reported as an update of the group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDiff {
    pub camera_changed: bool,
    pub overlay_changed: bool,
    pub added: Vec<ItemId>,
    pub removed: Vec<ItemId>,
    pub updated: Vec<ItemId>,
    /// The surviving primitives are drawn in a different order.
    pub reordered: bool,
}

impl FrameDiff {
    /// Nothing to repaint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.camera_changed
            && !self.overlay_changed
            && !self.reordered
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
    }

    /// Diff of a first frame: everything is new.
    fn initial(next: &Frame) -> Self {
        Self {
            camera_changed: true,
            overlay_changed: true,
            added: next.primitives.iter().map(|p| p.id().to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Compare `next` with the previously painted frame.
#[must_use]
pub fn diff(prev: Option<&Frame>, next: &Frame) -> FrameDiff {
    let Some(prev) = prev else {
        return FrameDiff::initial(next);
    };

    let before: HashMap<&str, &Primitive> = prev.primitives.iter().map(|p| (p.id(), p)).collect();
    let after: HashMap<&str, &Primitive> = next.primitives.iter().map(|p| (p.id(), p)).collect();

    let mut out = FrameDiff {
        camera_changed: prev.camera != next.camera,
        overlay_changed: prev.overlay != next.overlay,
        ..FrameDiff::default()
    };

    for primitive in &next.primitives {
        match before.get(primitive.id()) {
            None => out.added.push(primitive.id().to_string()),
            Some(old) if *old != primitive => out.updated.push(primitive.id().to_string()),
            Some(_) => {}
        }
    }
    for primitive in &prev.primitives {
        if !after.contains_key(primitive.id()) {
            out.removed.push(primitive.id().to_string());
        }
    }

    let kept_before = prev.primitives.iter().map(Primitive::id).filter(|id| after.contains_key(id));
    let kept_after = next.primitives.iter().map(Primitive::id).filter(|id| before.contains_key(id));
    out.reordered = !kept_before.eq(kept_after);

    out
}
