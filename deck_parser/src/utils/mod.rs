//! Shared location types used by the parser, deck containers and logging

pub mod span;

pub use span::{KeywordLocation, Position, Span};
