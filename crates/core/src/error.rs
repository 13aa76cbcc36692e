//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (validation, data
/// integrity, configuration consistency). The two legitimate empty states of
/// the view pipeline (no active machine, no catalog data) are `None` values
/// at the provider boundary, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty or blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A catalog entry is missing a required metadata field.
    ///
    /// Raised per record; callers decide whether to skip the record or abort.
    #[error("material {material_id}: missing required metadata field `{field}`")]
    MissingMetadata {
        material_id: String,
        field: &'static str,
    },

    /// The selected extruder position does not exist on the active machine.
    ///
    /// Indicates the view and the machine model have diverged.
    #[error("machine {machine} has no extruder at position {position}")]
    ExtruderNotFound { machine: String, position: u32 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn missing_metadata(material_id: impl Into<String>, field: &'static str) -> Self {
        Self::MissingMetadata {
            material_id: material_id.into(),
            field,
        }
    }

    pub fn extruder_not_found(machine: impl Into<String>, position: u32) -> Self {
        Self::ExtruderNotFound {
            machine: machine.into(),
            position,
        }
    }
}
