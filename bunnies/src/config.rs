//! Stage configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ITEM_SIZE_PX, MARGIN_PX, SURFACE_HEIGHT_DEFAULT, SURFACE_WIDTH_DEFAULT};
use crate::error::ControlError;

pub const ENV_SURFACE_WIDTH: &str = "BUNNIES_SURFACE_WIDTH";
pub const ENV_SURFACE_HEIGHT: &str = "BUNNIES_SURFACE_HEIGHT";
pub const ENV_ITEM_SIZE: &str = "BUNNIES_ITEM_SIZE";
pub const ENV_MARGIN: &str = "BUNNIES_MARGIN";
pub const ENV_ROTATION_UNIT: &str = "BUNNIES_ROTATION_UNIT";

/// Unit in which the rotation field's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationUnit {
    #[default]
    Radians,
    Degrees,
}

impl RotationUnit {
    /// Convert a field value in this unit to radians for the render surface.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }

    /// Parse `radians` / `degrees` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] for any other spelling.
    pub fn parse(raw: &str) -> Result<Self, ControlError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "radians" | "rad" => Ok(Self::Radians),
            "degrees" | "deg" => Ok(Self::Degrees),
            other => Err(ControlError::Config(format!(
                "unsupported rotation unit '{other}' (expected 'radians' or 'degrees')"
            ))),
        }
    }
}

/// Geometry of the stage and how entities are laid out on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Stage width in CSS pixels; determines how many cells fit in a row.
    pub surface_width: f64,
    /// Stage height in CSS pixels.
    pub surface_height: f64,
    /// Side length of one square grid cell.
    pub item_size: f64,
    /// Offset of the first cell from the top-left corner.
    pub margin: f64,
    /// Unit of the rotation field.
    pub rotation_unit: RotationUnit,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH_DEFAULT,
            surface_height: SURFACE_HEIGHT_DEFAULT,
            item_size: ITEM_SIZE_PX,
            margin: MARGIN_PX,
            rotation_unit: RotationUnit::Radians,
        }
    }
}

impl SceneConfig {
    /// Build the stage config from environment variables.
    ///
    /// Optional:
    /// - `BUNNIES_SURFACE_WIDTH`: default 800
    /// - `BUNNIES_SURFACE_HEIGHT`: default 600
    /// - `BUNNIES_ITEM_SIZE`: default 50
    /// - `BUNNIES_MARGIN`: default 10
    /// - `BUNNIES_ROTATION_UNIT`: `radians` (default) or `degrees`
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ControlError> {
        let defaults = Self::default();
        let rotation_unit = match std::env::var(ENV_ROTATION_UNIT) {
            Ok(raw) => RotationUnit::parse(&raw)?,
            Err(_) => defaults.rotation_unit,
        };

        let config = Self {
            surface_width: env_parse_f64(ENV_SURFACE_WIDTH, defaults.surface_width)?,
            surface_height: env_parse_f64(ENV_SURFACE_HEIGHT, defaults.surface_height)?,
            item_size: env_parse_f64(ENV_ITEM_SIZE, defaults.item_size)?,
            margin: env_parse_f64(ENV_MARGIN, defaults.margin)?,
            rotation_unit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the grid layout cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] for a non-positive item size, a
    /// negative margin, or a negative surface dimension.
    pub fn validate(&self) -> Result<(), ControlError> {
        if !(self.item_size.is_finite() && self.item_size > 0.0) {
            return Err(ControlError::Config(format!("item size must be positive, got {}", self.item_size)));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ControlError::Config(format!("margin must be non-negative, got {}", self.margin)));
        }
        let finite = self.surface_width.is_finite() && self.surface_height.is_finite();
        if !(finite && self.surface_width >= 0.0 && self.surface_height >= 0.0) {
            return Err(ControlError::Config(format!(
                "surface size must be non-negative, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        Ok(())
    }
}

fn env_parse_f64(key: &str, default: f64) -> Result<f64, ControlError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ControlError::Config(format!("{key} is not a number: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

