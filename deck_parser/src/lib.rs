// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod deck;
pub mod parser;
pub mod raw;
pub mod schema;
pub mod units;
pub mod utils;
pub mod value;

// Re-export key types for library consumers
pub use deck::{Deck, DeckError, DeckItem, DeckKeyword, DeckOutput, DeckRecord, TableColumn, TableError};
pub use parser::{ParseError, ParseResult, Parser};
pub use raw::RawRecord;
pub use schema::{KeywordRegistry, ParserItem, ParserKeyword, ParserRecord, TableSchema};
pub use units::{Dimension, UnitSystem, UnitType};
pub use value::{DeckValue, UDAValue, ValueStatus};
