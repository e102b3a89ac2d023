//! `DeckValue`: a scalar that is unset, an integer, a double or a string
//!
//! Used for schema defaults and for records built from code. Reads are typed:
//! `get::<T>()` only succeeds when the tag matches `T`, with the single
//! exception that an integer can be read as a double.

use super::error::{ValueError, ValueResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckValue {
    #[default]
    Unset,
    Int(i32),
    Double(f64),
    String(String),
}

impl DeckValue {
    /// True only for the unset state
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn value_type(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
        }
    }

    pub fn get<T: FromDeckValue>(&self) -> ValueResult<T> {
        T::from_deck_value(self)
            .ok_or_else(|| ValueError::type_mismatch(T::TYPE_NAME, self.value_type()))
    }

    /// Same rule as `get`, never fails
    pub fn is_compatible<T: FromDeckValue>(&self) -> bool {
        T::from_deck_value(self).is_some()
    }
}

impl From<i32> for DeckValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for DeckValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for DeckValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for DeckValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for DeckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "<default>"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{:?}", v),
            Self::String(v) => f.write_str(&quote(v)),
        }
    }
}

/// Quote text for deck output; text holding `'` goes in double quotes
pub fn quote(text: &str) -> String {
    if text.contains('\'') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}

/// Types that can be read out of a `DeckValue`
pub trait FromDeckValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_deck_value(value: &DeckValue) -> Option<Self>;
}

impl FromDeckValue for i32 {
    const TYPE_NAME: &'static str = "int";

    fn from_deck_value(value: &DeckValue) -> Option<Self> {
        match value {
            DeckValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromDeckValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_deck_value(value: &DeckValue) -> Option<Self> {
        match value {
            DeckValue::Double(v) => Some(*v),
            DeckValue::Int(v) => Some(f64::from(*v)),
            _ => None,
        }
    }
}

impl FromDeckValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_deck_value(value: &DeckValue) -> Option<Self> {
        match value {
            DeckValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}
