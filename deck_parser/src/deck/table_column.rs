//! Table columns cut from an ALL-sized DOUBLE item
//!
//! Tables such as saturation functions are written as one long list of
//! numbers, row by row. A `TableColumn` takes every n-th value, converts it
//! to SI, and resolves defaulted cells according to its `ColumnSchema`.

use super::error::TableError;
use super::item::DeckItem;
use crate::schema::{ColumnSchema, DefaultAction, ItemType, TableSchema};

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    schema: ColumnSchema,
    values: Vec<Option<f64>>,
    defaulted: Vec<bool>,
}

impl TableColumn {
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            values: Vec::new(),
            defaulted: Vec::new(),
        }
    }

    /// Column `column` of a table with `num_columns` columns
    pub fn from_item(
        schema: &ColumnSchema,
        item: &DeckItem,
        column: usize,
        num_columns: usize,
    ) -> Result<Self, TableError> {
        if item.item_type() != ItemType::Double {
            return Err(TableError::NotDoubleItem {
                item: item.name().to_string(),
            });
        }

        let slots = item.slots::<f64>()?;
        if num_columns == 0 || column >= num_columns || slots.len() % num_columns != 0 {
            return Err(TableError::RaggedData {
                values: slots.len(),
                columns: num_columns,
            });
        }

        let mut table_column = Self::new(schema.clone());
        for slot in slots.iter().skip(column).step_by(num_columns) {
            if slot.status.defaulted() {
                table_column.add_default();
            } else {
                table_column.add_value(slot.dimension.convert_raw_to_si(slot.value));
            }
        }
        Ok(table_column)
    }

    pub fn add_value(&mut self, value: f64) {
        self.values.push(Some(value));
        self.defaulted.push(false);
    }

    pub fn add_default(&mut self) {
        self.values.push(None);
        self.defaulted.push(true);
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether row `index` was defaulted in the input
    pub fn defaulted(&self, index: usize) -> bool {
        self.defaulted.get(index).copied().unwrap_or(false)
    }

    pub fn get(&self, index: usize) -> Result<f64, TableError> {
        match self.values.get(index) {
            Some(Some(value)) => Ok(*value),
            Some(None) => Err(self.unresolved(index)),
            None => Err(crate::deck::DeckError::index_out_of_range(
                index,
                self.values.len(),
                self.name(),
            )
            .into()),
        }
    }

    pub fn values(&self) -> Result<Vec<f64>, TableError> {
        (0..self.size()).map(|index| self.get(index)).collect()
    }

    /// Fill defaulted rows. `argument` is the x-column for linear
    /// interpolation; without one the row index is used.
    pub fn apply_defaults(&mut self, argument: Option<&TableColumn>) -> Result<(), TableError> {
        let Some(first_default) = self.values.iter().position(Option::is_none) else {
            return Ok(());
        };

        match self.schema.default_action {
            DefaultAction::None => Err(self.unresolved(first_default)),
            DefaultAction::Const(value) => {
                for cell in self.values.iter_mut().filter(|cell| cell.is_none()) {
                    *cell = Some(value);
                }
                Ok(())
            }
            DefaultAction::Linear => self.interpolate(argument),
        }
    }

    fn interpolate(&mut self, argument: Option<&TableColumn>) -> Result<(), TableError> {
        let x: Vec<f64> = match argument {
            Some(arg) if arg.size() != self.size() => {
                return Err(TableError::RaggedData {
                    values: arg.size(),
                    columns: self.size(),
                })
            }
            Some(arg) => arg.values()?,
            None => (0..self.size()).map(|index| index as f64).collect(),
        };

        let resolved = self.values.clone();
        for index in 0..self.values.len() {
            if resolved[index].is_some() {
                continue;
            }

            let below = (0..index).rev().find_map(|i| resolved[i].map(|v| (i, v)));
            let above = (index + 1..resolved.len()).find_map(|i| resolved[i].map(|v| (i, v)));

            let (Some((lo, lo_value)), Some((hi, hi_value))) = (below, above) else {
                return Err(self.unresolved(index));
            };

            let span = x[hi] - x[lo];
            let value = if span == 0.0 {
                lo_value
            } else {
                lo_value + (hi_value - lo_value) * (x[index] - x[lo]) / span
            };
            self.values[index] = Some(value);
        }
        Ok(())
    }

    pub fn validate_order(&self) -> Result<(), TableError> {
        let values = self.values()?;
        for (row, pair) in values.windows(2).enumerate() {
            if !self.schema.valid_order(pair[0], pair[1]) {
                return Err(TableError::OrderViolation {
                    column: self.schema.name.clone(),
                    order: self.schema.order.as_str(),
                    row: row + 1,
                });
            }
        }
        Ok(())
    }

    fn unresolved(&self, row: usize) -> TableError {
        TableError::DefaultNotAllowed {
            column: self.schema.name.clone(),
            row,
        }
    }
}

/// Split `item` into the columns of `schema`, resolve defaults and check order.
/// The first column is the interpolation argument of the others.
pub fn build_table(schema: &TableSchema, item: &DeckItem) -> Result<Vec<TableColumn>, TableError> {
    let num_columns = schema.size();
    let mut columns = schema
        .iter()
        .enumerate()
        .map(|(index, column)| TableColumn::from_item(column, item, index, num_columns))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some((first, rest)) = columns.split_first_mut() {
        first.apply_defaults(None)?;
        for column in rest {
            column.apply_defaults(Some(first))?;
        }
    }

    for column in &columns {
        column.validate_order()?;
    }

    Ok(columns)
}
