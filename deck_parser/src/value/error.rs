//! Errors raised when reading typed scalars

use crate::logging::codes::{self, Code};

pub type ValueResult<T> = Result<T, ValueError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("Type mismatch: requested {expected}, value holds {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value '{value}' is not numeric")]
    NotNumeric { value: String },
}

impl ValueError {
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    pub fn not_numeric(value: &str) -> Self {
        Self::NotNumeric {
            value: value.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::TypeMismatch { .. } => codes::value::TYPE_MISMATCH,
            Self::NotNumeric { .. } => codes::value::NOT_NUMERIC,
        }
    }
}
