//! Typed scalar values: per-slot status, `DeckValue` and `UDAValue`

pub mod deck_value;
pub mod error;
pub mod status;
pub mod uda;

pub use deck_value::{quote, DeckValue, FromDeckValue};
pub use error::{ValueError, ValueResult};
pub use status::{defaulted, has_value, ValueStatus};
pub use uda::{FromUDAValue, UDAPayload, UDAValue};
