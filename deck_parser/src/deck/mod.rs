//! Parsed deck data: items, records, keywords and the deck itself

pub mod deck;
pub mod error;
pub mod item;
pub mod keyword;
pub mod output;
pub mod record;
pub mod table_column;

pub use deck::Deck;
pub use error::{DeckError, DeckResult, TableError};
pub use item::{DeckItem, ItemData, ItemValue, Slot};
pub use keyword::DeckKeyword;
pub use output::DeckOutput;
pub use record::DeckRecord;
pub use table_column::{build_table, TableColumn};
