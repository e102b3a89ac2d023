//! Keyword registry: keyword name to schema
//!
//! The parser looks every keyword header up here. Schemas are either built
//! in code or loaded from JSON data files.

use super::error::{SchemaError, SchemaResult};
use super::keyword::{KeywordSize, ParserKeyword};
use crate::logging::codes;
use crate::units::UnitType;
use crate::log_success;
use std::collections::HashMap;

/// Section and terminator keywords that carry no records
const SECTION_KEYWORDS: &[&str] = &[
    "RUNSPEC", "GRID", "EDIT", "PROPS", "REGIONS", "SOLUTION", "SUMMARY", "SCHEDULE", "END",
];

#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    keywords: HashMap<String, ParserKeyword>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit-system switches and section markers
    pub fn with_builtin_keywords() -> Self {
        let mut registry = Self::new();

        for unit_type in [UnitType::Metric, UnitType::Field, UnitType::Lab, UnitType::PvtM] {
            if let Ok(keyword) = ParserKeyword::unit_system(unit_type) {
                registry.insert(keyword);
            }
        }

        for name in SECTION_KEYWORDS {
            if let Ok(keyword) = ParserKeyword::new(name, KeywordSize::Fixed(0)) {
                registry.insert(keyword);
            }
        }

        registry
    }

    /// Load keyword schemas from a JSON array of keyword objects
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let mut registry = Self::new();
        registry.extend_from_json_str(json)?;
        Ok(registry)
    }

    pub fn extend_from_json_str(&mut self, json: &str) -> SchemaResult<usize> {
        let keywords: Vec<ParserKeyword> = serde_json::from_str(json)?;
        let count = keywords.len();

        for keyword in keywords {
            self.register(keyword)?;
        }

        log_success!(
            codes::success::SCHEMA_LOADED,
            "Keyword schemas loaded",
            "keywords" => count,
            "registered" => self.len()
        );

        Ok(count)
    }

    pub fn register(&mut self, keyword: ParserKeyword) -> SchemaResult<()> {
        keyword.validate()?;
        if self.contains(keyword.name()) {
            return Err(SchemaError::duplicate_keyword(keyword.name()));
        }
        self.insert(keyword);
        Ok(())
    }

    fn insert(&mut self, keyword: ParserKeyword) {
        self.keywords.insert(keyword.name().to_string(), keyword);
    }

    pub fn get(&self, name: &str) -> Option<&ParserKeyword> {
        self.keywords.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.keywords.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
