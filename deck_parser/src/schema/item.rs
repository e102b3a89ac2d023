//! Item schema: name, type, size policy, default and dimension

use super::error::{SchemaError, SchemaResult};
use crate::value::DeckValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    Int,
    Double,
    String,
    Uda,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Uda => "UDA",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Double | Self::Uda)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemSize {
    /// Exactly one value
    #[default]
    Single,
    /// Every remaining token of the record
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserItem {
    pub name: String,
    #[serde(rename = "value_type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub size: ItemSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DeckValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
}

impl ParserItem {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            size: ItemSize::Single,
            default: None,
            dimension: None,
        }
    }

    /// Make this item consume all remaining tokens
    pub fn all(mut self) -> Self {
        self.size = ItemSize::All;
        self
    }

    pub fn with_default(mut self, value: impl Into<DeckValue>) -> Self {
        let value = value.into();
        self.default = match (self.item_type, value) {
            (ItemType::Double, DeckValue::Int(v)) => Some(DeckValue::Double(f64::from(v))),
            (_, DeckValue::Unset) => None,
            (_, value) => Some(value),
        };
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    pub fn is_all(&self) -> bool {
        self.size == ItemSize::All
    }

    /// Schema default, ignoring an explicit unset value
    pub fn default_value(&self) -> Option<&DeckValue> {
        self.default.as_ref().filter(|value| !value.is_default())
    }

    pub fn validate(&self) -> SchemaResult<()> {
        if let Some(default) = self.default_value() {
            let accepted = match self.item_type {
                ItemType::Int => matches!(default, DeckValue::Int(_)),
                ItemType::Double => matches!(default, DeckValue::Int(_) | DeckValue::Double(_)),
                ItemType::String => matches!(default, DeckValue::String(_)),
                ItemType::Uda => true,
            };
            if !accepted {
                return Err(SchemaError::DefaultTypeMismatch {
                    item: self.name.clone(),
                    expected: self.item_type.as_str(),
                    found: default.value_type(),
                });
            }
        }

        if let Some(dimension) = &self.dimension {
            if !self.item_type.is_numeric() {
                return Err(SchemaError::DimensionOnNonNumeric {
                    item: self.name.clone(),
                    item_type: self.item_type.as_str(),
                    dimension: dimension.clone(),
                });
            }
        }

        Ok(())
    }
}
