//! Control panel state: the three bounded fields the side panel edits.
//!
//! The panel is the single source of defaults for *new* bunnies. Updating a
//! field never touches existing entities; the controller decides whether the
//! new value also goes to the current selection.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COUNT_DEFAULT, COUNT_MAX, COUNT_MIN, COUNT_STEP, ROTATION_DEFAULT, ROTATION_MAX, ROTATION_MIN, ROTATION_STEP,
    SCALE_DEFAULT, SCALE_MAX, SCALE_MIN, SCALE_STEP,
};
use crate::error::ControlError;

/// Identifies one of the panel's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    /// Number of bunnies on the stage.
    Count,
    /// Uniform scale for new or selected bunnies.
    Scale,
    /// Rotation for new or selected bunnies.
    Rotation,
}

impl FieldId {
    /// All fields in panel display order.
    pub const ALL: [Self; 3] = [Self::Count, Self::Scale, Self::Rotation];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = ControlError;

    /// `amount` is accepted for the count field; it is the id the panel
    /// widget has historically reported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" | "amount" => Ok(Self::Count),
            "scale" => Ok(Self::Scale),
            "rotation" => Ok(Self::Rotation),
            other => Err(ControlError::UnknownField(other.to_owned())),
        }
    }
}

/// Widget flavor used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free numeric entry.
    Number,
    /// Slider.
    Range,
}

/// A bounded, steppable scalar edited through one panel widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlField {
    pub id: FieldId,
    pub kind: FieldKind,
    pub label: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ControlField {
    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Parse the raw text a widget reported into a finite number.
    ///
    /// Surrounding whitespace is ignored. Bounds are not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidNumber`] for empty, non-numeric, or
    /// non-finite input.
    pub fn coerce(&self, raw: &str) -> Result<f64, ControlError> {
        let invalid = || ControlError::InvalidNumber { field: self.id, raw: raw.to_owned() };
        let value = raw.trim().parse::<f64>().map_err(|_| invalid())?;
        if value.is_finite() { Ok(value) } else { Err(invalid()) }
    }
}

/// Scale and rotation seeded into each newly created bunny.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDefaults {
    pub scale: f64,
    pub rotation: f64,
}

/// The three panel fields, owned in one place and passed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    fields: [ControlField; 3],
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            fields: [
                ControlField {
                    id: FieldId::Count,
                    kind: FieldKind::Number,
                    label: "Bunnies No.",
                    value: COUNT_DEFAULT,
                    min: COUNT_MIN,
                    max: COUNT_MAX,
                    step: COUNT_STEP,
                },
                ControlField {
                    id: FieldId::Scale,
                    kind: FieldKind::Range,
                    label: "Bunny Size",
                    value: SCALE_DEFAULT,
                    min: SCALE_MIN,
                    max: SCALE_MAX,
                    step: SCALE_STEP,
                },
                ControlField {
                    id: FieldId::Rotation,
                    kind: FieldKind::Range,
                    label: "Bunny Rotation",
                    value: ROTATION_DEFAULT,
                    min: ROTATION_MIN,
                    max: ROTATION_MAX,
                    step: ROTATION_STEP,
                },
            ],
        }
    }
}

impl ControlPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> &ControlField {
        &self.fields[Self::slot(id)]
    }

    /// All fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[ControlField] {
        &self.fields
    }

    /// Store a new value for `id` and return what was stored.
    ///
    /// Range fields clamp to their bounds. The count field stores the value
    /// verbatim; the controller validates counts before calling this.
    pub fn set_field(&mut self, id: FieldId, value: f64) -> f64 {
        let field = &mut self.fields[Self::slot(id)];
        field.value = match field.kind {
            FieldKind::Range => field.clamp(value),
            FieldKind::Number => value,
        };
        field.value
    }

    /// Current target bunny count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count(&self) -> usize {
        self.field(FieldId::Count).value.max(0.0) as usize
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.field(FieldId::Scale).value
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.field(FieldId::Rotation).value
    }

    /// Seed values for the next bunny created.
    #[must_use]
    pub fn defaults(&self) -> EntityDefaults {
        EntityDefaults { scale: self.scale(), rotation: self.rotation() }
    }

    fn slot(id: FieldId) -> usize {
        match id {
            FieldId::Count => 0,
            FieldId::Scale => 1,
            FieldId::Rotation => 2,
        }
    }
}
