//! Errors raised while turning deck text into records

use crate::deck::DeckError;
use crate::logging::codes::{self, Code};
use crate::schema::SchemaError;
use crate::units::UnitError;
use crate::utils::KeywordLocation;
use crate::value::ValueError;
use std::path::Path;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot read '{token}' as {expected} for item {item} ({location})")]
    InvalidValue {
        token: String,
        item: String,
        expected: &'static str,
        location: KeywordLocation,
    },

    #[error("Invalid repeat count in '{token}' ({location})")]
    InvalidRepeatCount {
        token: String,
        location: KeywordLocation,
    },

    #[error("Unterminated quoted string ({location})")]
    UnterminatedQuote { location: KeywordLocation },

    #[error("{count} value(s) left over after the last item ({location})")]
    ExtraData {
        count: usize,
        location: KeywordLocation,
    },

    #[error("Unknown keyword '{keyword}' ({location})")]
    UnknownKeyword {
        keyword: String,
        location: KeywordLocation,
    },

    #[error("Keyword expects {expected} record(s), found {found} ({location})")]
    MissingRecords {
        expected: usize,
        found: usize,
        location: KeywordLocation,
    },

    #[error("Input ended before the record was closed with '/' ({location})")]
    UnterminatedRecord { location: KeywordLocation },

    #[error("Record has more than {max} tokens ({location})")]
    TooManyTokens {
        max: usize,
        location: KeywordLocation,
    },

    #[error("Token of {length} characters exceeds the limit of {max} ({location})")]
    TokenTooLong {
        length: usize,
        max: usize,
        location: KeywordLocation,
    },

    #[error("Unexpected text '{text}' in {filename} line {line}")]
    RandomText {
        text: String,
        filename: String,
        line: u32,
    },

    #[error("Deck has more than {max} keywords")]
    TooManyKeywords { max: usize },

    #[error("Keyword has more than {max} records ({location})")]
    TooManyRecords {
        max: usize,
        location: KeywordLocation,
    },

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("Value error: {0}")]
    Value(#[from] ValueError),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File '{path}' is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: String,
        size: u64,
        max_size: u64,
    },

    #[error("File '{path}' is not valid UTF-8")]
    InvalidEncoding { path: String },
}

impl ParseError {
    pub fn invalid_value(
        token: &str,
        item: &str,
        expected: &'static str,
        location: &KeywordLocation,
    ) -> Self {
        Self::InvalidValue {
            token: token.to_string(),
            item: item.to_string(),
            expected,
            location: location.clone(),
        }
    }

    pub fn invalid_repeat_count(token: &str, location: &KeywordLocation) -> Self {
        Self::InvalidRepeatCount {
            token: token.to_string(),
            location: location.clone(),
        }
    }

    pub fn io(path: &Path, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    pub fn location(&self) -> Option<&KeywordLocation> {
        match self {
            Self::InvalidValue { location, .. }
            | Self::InvalidRepeatCount { location, .. }
            | Self::UnterminatedQuote { location }
            | Self::ExtraData { location, .. }
            | Self::UnknownKeyword { location, .. }
            | Self::MissingRecords { location, .. }
            | Self::UnterminatedRecord { location }
            | Self::TooManyTokens { location, .. }
            | Self::TokenTooLong { location, .. }
            | Self::TooManyRecords { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidValue { .. } => codes::parse::INVALID_VALUE,
            Self::InvalidRepeatCount { .. } => codes::parse::INVALID_REPEAT_COUNT,
            Self::UnterminatedQuote { .. } => codes::raw_record::UNTERMINATED_QUOTE,
            Self::ExtraData { .. } => codes::parse::EXTRA_DATA,
            Self::UnknownKeyword { .. } => codes::parse::UNKNOWN_KEYWORD,
            Self::MissingRecords { .. } => codes::parse::MISSING_RECORDS,
            Self::UnterminatedRecord { .. } => codes::parse::UNTERMINATED_RECORD,
            Self::TooManyTokens { .. } => codes::raw_record::TOO_MANY_TOKENS,
            Self::TokenTooLong { .. } => codes::raw_record::TOKEN_TOO_LONG,
            Self::RandomText { .. } => codes::parse::RANDOM_TEXT,
            Self::TooManyKeywords { .. } => codes::parse::TOO_MANY_KEYWORDS,
            Self::TooManyRecords { .. } => codes::parse::TOO_MANY_RECORDS,
            Self::Unit(e) => e.error_code(),
            Self::Schema(e) => e.error_code(),
            Self::Deck(e) => e.error_code(),
            Self::Value(e) => e.error_code(),
            Self::Io { .. } => codes::file_processing::IO_ERROR,
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
        }
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}
