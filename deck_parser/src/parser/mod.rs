//! Parsing: deck text to keywords, raw records to typed records

pub mod deck_parser;
pub mod error;
pub mod record_parser;

pub use deck_parser::Parser;
pub use error::{ParseError, ParseResult};
pub use record_parser::{classify_token, parse_record, parse_record_with, record_from_values, StarToken};
