//! Schema construction errors

use crate::logging::codes::{self, Code};

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Duplicate item '{item}' in record schema")]
    DuplicateItem { item: String },

    #[error("Default for item '{item}' is {found}, item type is {expected}")]
    DefaultTypeMismatch {
        item: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("ALL-sized item '{item}' must be the last item of its record")]
    AllItemNotLast { item: String },

    #[error("Invalid keyword name '{name}': {reason}")]
    InvalidKeywordName { name: String, reason: String },

    #[error("Item '{item}' of type {item_type} cannot carry dimension '{dimension}'")]
    DimensionOnNonNumeric {
        item: String,
        item_type: &'static str,
        dimension: String,
    },

    #[error("Keyword '{name}' is already registered")]
    DuplicateKeyword { name: String },

    #[error("Invalid schema data: {message}")]
    Json { message: String },

    #[error("Duplicate column '{column}' in table schema")]
    DuplicateColumn { column: String },

    #[error("Table schema has no column '{column}'")]
    ColumnNotFound { column: String },

    #[error("Keyword '{keyword}' expects records but declares no record schema")]
    MissingRecordSchema { keyword: String },

    #[error("Data keyword '{keyword}' needs records of a single ALL-sized item")]
    InvalidDataKeyword { keyword: String },

    #[error("Keyword '{keyword}' declares unusable record terminator '{terminator}'")]
    InvalidTerminator { keyword: String, terminator: String },
}

impl SchemaError {
    pub fn duplicate_item(item: &str) -> Self {
        Self::DuplicateItem {
            item: item.to_string(),
        }
    }

    pub fn invalid_keyword_name(name: &str, reason: &str) -> Self {
        Self::InvalidKeywordName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn duplicate_keyword(name: &str) -> Self {
        Self::DuplicateKeyword {
            name: name.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateItem { .. } => codes::schema::DUPLICATE_ITEM,
            Self::DefaultTypeMismatch { .. } => codes::schema::DEFAULT_TYPE_MISMATCH,
            Self::AllItemNotLast { .. } => codes::schema::ALL_ITEM_NOT_LAST,
            Self::InvalidKeywordName { .. } => codes::schema::INVALID_KEYWORD_NAME,
            Self::DimensionOnNonNumeric { .. } => codes::schema::DIMENSION_ON_NON_NUMERIC,
            Self::DuplicateKeyword { .. } => codes::schema::DUPLICATE_KEYWORD,
            Self::Json { .. }
            | Self::MissingRecordSchema { .. }
            | Self::InvalidDataKeyword { .. }
            | Self::InvalidTerminator { .. } => codes::schema::SCHEMA_FORMAT_ERROR,
            Self::DuplicateColumn { .. } => codes::schema::DUPLICATE_COLUMN,
            Self::ColumnNotFound { .. } => codes::table::COLUMN_NOT_FOUND,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
        }
    }
}
