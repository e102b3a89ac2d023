//! Per-slot value status
//!
//! Every slot of a `DeckItem` carries one of these. A slot is `Uninitialized`
//! only while the engine is still filling the item.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueStatus {
    #[default]
    Uninitialized,
    /// Value was written explicitly in the deck
    DeckValue,
    /// Defaulted with no schema default, the slot holds no usable value
    EmptyDefault,
    /// Defaulted and filled from the schema default
    ValidDefault,
}

impl ValueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::DeckValue => "deck_value",
            Self::EmptyDefault => "empty_default",
            Self::ValidDefault => "valid_default",
        }
    }

    pub fn defaulted(self) -> bool {
        defaulted(self)
    }

    pub fn has_value(self) -> bool {
        has_value(self)
    }
}

impl fmt::Display for ValueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True for both default kinds
pub fn defaulted(status: ValueStatus) -> bool {
    matches!(status, ValueStatus::EmptyDefault | ValueStatus::ValidDefault)
}

/// True when the slot holds a readable value
pub fn has_value(status: ValueStatus) -> bool {
    matches!(status, ValueStatus::DeckValue | ValueStatus::ValidDefault)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_over_all_states() {
        let cases = [
            (ValueStatus::Uninitialized, false, false),
            (ValueStatus::DeckValue, false, true),
            (ValueStatus::EmptyDefault, true, false),
            (ValueStatus::ValidDefault, true, true),
        ];

        for (status, is_defaulted, holds_value) in cases {
            assert_eq!(defaulted(status), is_defaulted, "{}", status);
            assert_eq!(has_value(status), holds_value, "{}", status);
            assert_eq!(status.defaulted(), is_defaulted);
            assert_eq!(status.has_value(), holds_value);
        }
    }

    #[test]
    fn test_default_is_uninitialized() {
        assert_eq!(ValueStatus::default(), ValueStatus::Uninitialized);
        assert_eq!(ValueStatus::ValidDefault.to_string(), "valid_default");
    }
}
