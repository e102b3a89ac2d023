//! Unit system errors

use crate::logging::codes::{self, Code};

pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown dimension '{name}' in unit system {system}")]
    UnknownDimension { name: String, system: String },

    #[error("Invalid composite dimension '{dimension}': {reason}")]
    InvalidComposite { dimension: String, reason: String },

    #[error("Unknown unit system '{name}'")]
    UnknownUnitSystem { name: String },
}

impl UnitError {
    pub fn unknown_dimension(name: &str, system: &str) -> Self {
        Self::UnknownDimension {
            name: name.to_string(),
            system: system.to_string(),
        }
    }

    pub fn invalid_composite(dimension: &str, reason: &str) -> Self {
        Self::InvalidComposite {
            dimension: dimension.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_unit_system(name: &str) -> Self {
        Self::UnknownUnitSystem {
            name: name.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownDimension { .. } => codes::units::UNKNOWN_DIMENSION,
            Self::InvalidComposite { .. } => codes::units::INVALID_COMPOSITE,
            Self::UnknownUnitSystem { .. } => codes::units::UNKNOWN_UNIT_SYSTEM,
        }
    }
}
