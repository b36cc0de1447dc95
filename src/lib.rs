//! Pan/zoom viewport and marquee-selection engine for a 2D canvas editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interaction side of the editor: translating raw pointer and wheel events
//! into camera transforms, tracking the active gesture, mapping the host's
//! scene items to drawable primitives, and drawing the marquee overlay. The
//! host JavaScript layer hands in scene items as JSON and forwards DOM events
//! to [`web::Editor`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Scene item types and the validated [`scene::Scene`] |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Item-to-primitive mapping and the [`render::Surface`] trait |
//! | [`overlay`] | Marquee selection overlay |
//! | [`reconcile`] | Frame diffing between render passes |
//! | [`config`] | Editor configuration loaded from JSON |
//! | [`web`] | `wasm-bindgen` host component and canvas 2D surface |
//! | [`consts`] | Shared numeric constants (zoom limits, default geometry, colors) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod overlay;
pub mod reconcile;
pub mod render;
pub mod scene;
pub mod web;
