//! `Deck`: parsed keywords in input order plus the unit systems they use

use super::error::{DeckError, DeckResult};
use super::keyword::DeckKeyword;
use super::output::DeckOutput;
use crate::units::UnitSystem;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Deck {
    keywords: Vec<DeckKeyword>,
    active_unit_system: UnitSystem,
    default_unit_system: UnitSystem,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            keywords: Vec::new(),
            active_unit_system: UnitSystem::new_metric(),
            default_unit_system: UnitSystem::new_metric(),
        }
    }

    pub fn add_keyword(&mut self, keyword: DeckKeyword) {
        self.keywords.push(keyword);
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword.name() == name)
    }

    /// Number of occurrences of `name`
    pub fn count(&self, name: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| keyword.name() == name)
            .count()
    }

    pub fn get_keyword(&self, name: &str, occurrence: usize) -> DeckResult<&DeckKeyword> {
        self.keywords
            .iter()
            .filter(|keyword| keyword.name() == name)
            .nth(occurrence)
            .ok_or_else(|| DeckError::KeywordNotFound {
                keyword: name.to_string(),
                occurrence,
            })
    }

    pub fn get_keywords(&self, name: &str) -> Vec<&DeckKeyword> {
        self.keywords
            .iter()
            .filter(|keyword| keyword.name() == name)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckKeyword> {
        self.keywords.iter()
    }

    pub fn size(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Unit system of explicit values
    pub fn active_unit_system(&self) -> &UnitSystem {
        &self.active_unit_system
    }

    /// Unit system of schema defaults
    pub fn default_unit_system(&self) -> &UnitSystem {
        &self.default_unit_system
    }

    pub fn set_active_unit_system(&mut self, unit_system: UnitSystem) {
        self.active_unit_system = unit_system;
    }

    pub fn write(&self, out: &mut DeckOutput) {
        for keyword in &self.keywords {
            keyword.write(out);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = DeckOutput::new();
        self.write(&mut out);
        f.write_str(out.as_str())
    }
}
