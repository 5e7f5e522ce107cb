//! Shared numeric constants for the bunnies crate.

// ── Count field ─────────────────────────────────────────────────

/// Fewest bunnies the panel allows.
pub const COUNT_MIN: f64 = 1.0;

/// Most bunnies the panel allows.
pub const COUNT_MAX: f64 = 64.0;

/// Count field step.
pub const COUNT_STEP: f64 = 1.0;

/// Bunnies created at startup.
pub const COUNT_DEFAULT: f64 = 12.0;

// ── Scale field ─────────────────────────────────────────────────

/// Smallest uniform scale.
pub const SCALE_MIN: f64 = 1.0;

/// Largest uniform scale.
pub const SCALE_MAX: f64 = 1.6;

/// Scale slider step.
pub const SCALE_STEP: f64 = 0.1;

/// Scale applied to bunnies created before any edit.
pub const SCALE_DEFAULT: f64 = 1.2;

// ── Rotation field ──────────────────────────────────────────────

/// Lowest rotation, in the configured rotation unit.
pub const ROTATION_MIN: f64 = -1.0;

/// Highest rotation, in the configured rotation unit.
pub const ROTATION_MAX: f64 = 1.0;

/// Rotation slider step.
pub const ROTATION_STEP: f64 = 0.1;

/// Rotation applied to bunnies created before any edit.
pub const ROTATION_DEFAULT: f64 = 0.0;

// ── Stage geometry ──────────────────────────────────────────────

/// Width and height of one grid cell, in CSS pixels.
pub const ITEM_SIZE_PX: f64 = 50.0;

/// Offset of the first grid cell from the stage's top-left corner.
pub const MARGIN_PX: f64 = 10.0;

/// Stage width used when nothing else is configured.
pub const SURFACE_WIDTH_DEFAULT: f64 = 800.0;

/// Stage height used when nothing else is configured.
pub const SURFACE_HEIGHT_DEFAULT: f64 = 600.0;

// ── Rendering ───────────────────────────────────────────────────

/// Selection outline dash segment length in screen pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;

/// Gap between a selected sprite and its outline, in screen pixels.
pub const SELECTION_PAD_PX: f64 = 2.0;
