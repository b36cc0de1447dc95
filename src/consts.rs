//! Shared numeric constants for the editor crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed camera scale.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed camera scale.
pub const MAX_ZOOM: f64 = 5.0;

/// Scale change applied per wheel notch while the zoom modifier is held.
pub const ZOOM_STEP: f64 = 0.1;

// ── Default geometry ────────────────────────────────────────────

/// Rectangle width when the item omits it.
pub const DEFAULT_RECT_WIDTH: f64 = 100.0;

/// Rectangle height when the item omits it.
pub const DEFAULT_RECT_HEIGHT: f64 = 100.0;

/// Circle radius when the item omits it.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 50.0;

// ── Colors ──────────────────────────────────────────────────────

/// Fill for rectangle items (blue).
pub const RECT_FILL: u32 = 0x0034_98db;

/// Fill for circle items (red).
pub const CIRCLE_FILL: u32 = 0x00e7_4c3c;

/// Marquee outline and fill color.
pub const SELECTION_COLOR: u32 = 0x0000_66cc;

/// Marquee outline width in world units.
pub const SELECTION_STROKE_WIDTH: f64 = 2.0;

/// Marquee outline opacity.
pub const SELECTION_STROKE_ALPHA: f64 = 0.8;

/// Marquee interior opacity.
pub const SELECTION_FILL_ALPHA: f64 = 0.1;
