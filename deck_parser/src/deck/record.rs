//! `DeckRecord`: the items of one record, in schema order

use super::error::{DeckError, DeckResult};
use super::item::DeckItem;
use super::output::DeckOutput;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct DeckRecord {
    items: Vec<DeckItem>,
}

impl DeckRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; callers add items in schema order
    pub fn add_item(&mut self, item: DeckItem) -> DeckResult<()> {
        if self.has_item(item.name()) {
            return Err(DeckError::DuplicateItem {
                item: item.name().to_string(),
            });
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

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name() == name)
    }

    pub fn get_item(&self, name: &str) -> DeckResult<&DeckItem> {
        self.items
            .iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| DeckError::ItemNotFound {
                item: name.to_string(),
            })
    }

    pub fn get_item_mut(&mut self, name: &str) -> DeckResult<&mut DeckItem> {
        self.items
            .iter_mut()
            .find(|item| item.name() == name)
            .ok_or_else(|| DeckError::ItemNotFound {
                item: name.to_string(),
            })
    }

    pub fn get_item_at(&self, index: usize) -> DeckResult<&DeckItem> {
        self.items
            .get(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, self.items.len(), "record"))
    }

    /// The only item of a record made of one ALL-sized item
    pub fn get_data_item(&self) -> DeckResult<&DeckItem> {
        match self.items.as_slice() {
            [item] if item.is_all() => Ok(item),
            [item] => Err(DeckError::not_data_record(&format!(
                "item '{}' is not ALL-sized",
                item.name()
            ))),
            items => Err(DeckError::not_data_record(&format!(
                "record has {} items",
                items.len()
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckItem> {
        self.items.iter()
    }

    pub fn write(&self, out: &mut DeckOutput) {
        out.start_record();
        self.write_data(out);
        out.end_record();
    }

    /// Item values without the record delimiters
    pub fn write_data(&self, out: &mut DeckOutput) {
        for item in &self.items {
            item.write(out);
        }
    }

    pub fn equal(&self, other: &DeckRecord, cmp_default: bool, cmp_numeric: bool) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.equal(b, cmp_default, cmp_numeric))
    }
}

impl PartialEq for DeckRecord {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, true, true)
    }
}

impl fmt::Display for DeckRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = DeckOutput::new();
        self.write(&mut out);
        f.write_str(out.as_str())
    }
}
