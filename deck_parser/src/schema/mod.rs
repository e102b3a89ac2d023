//! Keyword schemas consumed by the parser
//!
//! A keyword has a size policy and one or more record schemas; a record
//! schema is an ordered list of items. Tables add per-column ordering and
//! default rules on top of ALL-sized double items.

pub mod error;
pub mod item;
pub mod keyword;
pub mod record;
pub mod registry;
pub mod table;

pub use error::{SchemaError, SchemaResult};
pub use item::{ItemSize, ItemType, ParserItem};
pub use keyword::{is_valid_keyword_name, KeywordSize, ParserKeyword};
pub use record::ParserRecord;
pub use registry::KeywordRegistry;
pub use table::{ColumnOrder, ColumnSchema, DefaultAction, TableSchema};
