//! Error type for rejected control input.
//!
//! Nothing in the controller fails under valid input. These variants describe
//! input the controller refuses to apply; a refused event leaves every store
//! untouched, so hosts are free to log the error and carry on.

use crate::entity::EntityId;
use crate::panel::FieldId;

/// Why a control event or configuration value was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    /// The requested bunny count lies outside the count field's bounds.
    #[error("count {requested} is outside [{min}, {max}]")]
    CountOutOfRange { requested: f64, min: f64, max: f64 },
    /// The count field only accepts whole numbers.
    #[error("{field} must be a whole number, got {value}")]
    NotWholeNumber { field: FieldId, value: f64 },
    /// A widget reported text that does not parse to a finite number.
    #[error("{field} received non-numeric value {raw:?}")]
    InvalidNumber { field: FieldId, raw: String },
    /// No control field carries this id.
    #[error("unknown control field: {0}")]
    UnknownField(String),
    /// The registry already holds a live entity with this id.
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),
    /// An environment configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
