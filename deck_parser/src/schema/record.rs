//! Record schema: the ordered items of one record

use super::error::{SchemaError, SchemaResult};
use super::item::ParserItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParserRecord {
    items: Vec<ParserItem>,
}

impl ParserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ParserItem>) -> SchemaResult<Self> {
        let mut record = Self::new();
        for item in items {
            record.add_item(item)?;
        }
        Ok(record)
    }

    pub fn add_item(&mut self, item: ParserItem) -> SchemaResult<()> {
        item.validate()?;

        if self.get_by_name(&item.name).is_some() {
            return Err(SchemaError::duplicate_item(&item.name));
        }

        if let Some(last) = self.items.last() {
            if last.is_all() {
                return Err(SchemaError::AllItemNotLast {
                    item: last.name.clone(),
                });
            }
        }

        self.items.push(item);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParserItem> {
        self.items.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ParserItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParserItem> {
        self.items.iter()
    }

    /// A record made of a single ALL-sized item
    pub fn is_data_record(&self) -> bool {
        self.items.len() == 1 && self.items[0].is_all()
    }

    /// Re-check invariants; used after deserialization
    pub fn validate(&self) -> SchemaResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            item.validate()?;
            if self.items[..index].iter().any(|prev| prev.name == item.name) {
                return Err(SchemaError::duplicate_item(&item.name));
            }
            if item.is_all() && index + 1 != self.items.len() {
                return Err(SchemaError::AllItemNotLast {
                    item: item.name.clone(),
                });
            }
        }
        Ok(())
    }
}
