//! Errors raised when reading parsed deck data

use crate::logging::codes::{self, Code};
use crate::schema::SchemaError;
use crate::value::ValueError;

pub type DeckResult<T> = Result<T, DeckError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeckError {
    #[error("Index {index} out of range for {context} of size {size}")]
    IndexOutOfRange {
        index: usize,
        size: usize,
        context: String,
    },

    #[error("Item '{item}' holds {found} values, {expected} was requested")]
    TypeMismatch {
        item: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Record has no item named '{item}'")]
    ItemNotFound { item: String },

    #[error("Not a data record: {reason}")]
    NotDataRecord { reason: String },

    #[error("Item '{item}' slot {index} is defaulted without a default value")]
    ValueNotAvailable { item: String, index: usize },

    #[error("Record already holds an item named '{item}'")]
    DuplicateItem { item: String },

    #[error("Deck has no occurrence {occurrence} of keyword '{keyword}'")]
    KeywordNotFound { keyword: String, occurrence: usize },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl DeckError {
    pub fn index_out_of_range(index: usize, size: usize, context: &str) -> Self {
        Self::IndexOutOfRange {
            index,
            size,
            context: context.to_string(),
        }
    }

    pub fn type_mismatch(item: &str, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            item: item.to_string(),
            expected,
            found,
        }
    }

    pub fn not_data_record(reason: &str) -> Self {
        Self::NotDataRecord {
            reason: reason.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::IndexOutOfRange { .. } => codes::deck::INDEX_OUT_OF_RANGE,
            Self::TypeMismatch { .. } => codes::deck::TYPE_MISMATCH,
            Self::ItemNotFound { .. } => codes::deck::ITEM_NOT_FOUND,
            Self::NotDataRecord { .. } => codes::deck::NOT_DATA_RECORD,
            Self::ValueNotAvailable { .. } => codes::deck::VALUE_NOT_AVAILABLE,
            Self::DuplicateItem { .. } => codes::deck::DUPLICATE_ITEM,
            Self::KeywordNotFound { .. } => codes::deck::KEYWORD_NOT_FOUND,
            Self::Value(e) => e.error_code(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Errors from turning ALL-sized items into table columns
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("Column '{column}' row {row} is defaulted and cannot be resolved")]
    DefaultNotAllowed { column: String, row: usize },

    #[error("Column '{column}' violates {order} order at row {row}")]
    OrderViolation {
        column: String,
        order: &'static str,
        row: usize,
    },

    #[error("Item '{item}' is not a DOUBLE item")]
    NotDoubleItem { item: String },

    #[error("{values} values cannot be split into rows of {columns} columns")]
    RaggedData { values: usize, columns: usize },

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl TableError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::DefaultNotAllowed { .. } => codes::table::DEFAULT_NOT_ALLOWED,
            Self::OrderViolation { .. } => codes::table::ORDER_VIOLATION,
            Self::NotDoubleItem { .. } => codes::table::NOT_DOUBLE_ITEM,
            Self::RaggedData { .. } => codes::table::RAGGED_DATA,
            Self::Deck(e) => e.error_code(),
            Self::Schema(e) => e.error_code(),
        }
    }
}
