//! Column schema for tables built from ALL-sized double items

use super::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    Increasing,
    Decreasing,
    StrictlyIncreasing,
    StrictlyDecreasing,
    Random,
}

impl ColumnOrder {
    /// Whether `next` may follow `prev` in a column with this order
    pub fn valid_order(&self, prev: f64, next: f64) -> bool {
        match self {
            Self::Increasing => next >= prev,
            Self::Decreasing => next <= prev,
            Self::StrictlyIncreasing => next > prev,
            Self::StrictlyDecreasing => next < prev,
            Self::Random => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::StrictlyIncreasing => "strictly increasing",
            Self::StrictlyDecreasing => "strictly decreasing",
            Self::Random => "random",
        }
    }
}

/// What a defaulted cell in a column becomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAction {
    None,
    Const(f64),
    Linear,
}

impl DefaultAction {
    pub fn accepts_default(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn default_value(&self) -> Option<f64> {
        match self {
            Self::Const(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub order: ColumnOrder,
    pub default_action: DefaultAction,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, order: ColumnOrder, default_action: DefaultAction) -> Self {
        Self {
            name: name.into(),
            order,
            default_action,
        }
    }

    pub fn valid_order(&self, prev: f64, next: f64) -> bool {
        self.order.valid_order(prev, next)
    }

    pub fn accepts_default(&self) -> bool {
        self.default_action.accepts_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: ColumnSchema) -> SchemaResult<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    pub fn add_column(&mut self, column: ColumnSchema) -> SchemaResult<()> {
        if self.has_column(&column.name) {
            return Err(SchemaError::DuplicateColumn {
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn get_column(&self, name: &str) -> SchemaResult<&ColumnSchema> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn get_column_at(&self, index: usize) -> Option<&ColumnSchema> {
        self.columns.get(index)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter()
    }
}
