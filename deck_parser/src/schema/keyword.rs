//! Keyword schema

use super::error::{SchemaError, SchemaResult};
use super::item::ParserItem;
use super::record::ParserRecord;
use crate::config::compile_time::parser::MAX_KEYWORD_NAME_LENGTH;
use crate::units::UnitType;
use serde::{Deserialize, Serialize};

/// How many records a keyword takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSize {
    /// Exactly this many records, each closed by '/', no closing slash
    Fixed(usize),
    /// Records until an empty record
    SlashTerminated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserKeyword {
    name: String,
    size: KeywordSize,
    #[serde(default)]
    records: Vec<ParserRecord>,
    #[serde(default)]
    is_data_keyword: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit_system_switch: Option<UnitType>,
    /// Ends a record like '/' does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    terminator: Option<String>,
}

impl ParserKeyword {
    pub fn new(name: &str, size: KeywordSize) -> SchemaResult<Self> {
        validate_keyword_name(name)?;
        Ok(Self {
            name: name.to_string(),
            size,
            records: Vec::new(),
            is_data_keyword: false,
            unit_system_switch: None,
            terminator: None,
        })
    }

    /// One record holding a single ALL-sized item
    pub fn data_keyword(name: &str, item: ParserItem) -> SchemaResult<Self> {
        let mut keyword = Self::new(name, KeywordSize::Fixed(1))?;
        keyword.add_record(ParserRecord::from_items(vec![item.all()])?);
        keyword.is_data_keyword = true;
        Ok(keyword)
    }

    /// Record-less keyword that selects a unit system
    pub fn unit_system(unit_type: UnitType) -> SchemaResult<Self> {
        let mut keyword = Self::new(unit_type.as_str(), KeywordSize::Fixed(0))?;
        keyword.unit_system_switch = Some(unit_type);
        Ok(keyword)
    }

    pub fn with_record(mut self, record: ParserRecord) -> Self {
        self.add_record(record);
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = Some(terminator.into());
        self
    }

    pub fn add_record(&mut self, record: ParserRecord) {
        self.records.push(record);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> KeywordSize {
        self.size
    }

    pub fn is_slash_terminated(&self) -> bool {
        self.size == KeywordSize::SlashTerminated
    }

    pub fn is_data_keyword(&self) -> bool {
        self.is_data_keyword
    }

    pub fn unit_system_switch(&self) -> Option<UnitType> {
        self.unit_system_switch
    }

    /// Alternate record terminator, if any
    pub fn terminator(&self) -> Option<&str> {
        self.terminator.as_deref()
    }

    pub fn has_records(&self) -> bool {
        self.size != KeywordSize::Fixed(0)
    }

    /// Schema for record `index`; records past the declared ones reuse the last
    pub fn get_record(&self, index: usize) -> Option<&ParserRecord> {
        self.records.get(index).or_else(|| self.records.last())
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn validate(&self) -> SchemaResult<()> {
        validate_keyword_name(&self.name)?;

        if self.has_records() && self.records.is_empty() {
            return Err(SchemaError::MissingRecordSchema {
                keyword: self.name.clone(),
            });
        }

        for record in &self.records {
            record.validate()?;
        }

        if let Some(terminator) = &self.terminator {
            let usable = !terminator.is_empty()
                && !terminator.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"');
            if !usable {
                return Err(SchemaError::InvalidTerminator {
                    keyword: self.name.clone(),
                    terminator: terminator.clone(),
                });
            }
        }

        if self.is_data_keyword && !self.records.iter().all(ParserRecord::is_data_record) {
            return Err(SchemaError::InvalidDataKeyword {
                keyword: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// Upper-case letter first, then upper-case letters, digits, '_' or '-'
pub fn is_valid_keyword_name(name: &str) -> bool {
    validate_keyword_name(name).is_ok()
}

fn validate_keyword_name(name: &str) -> SchemaResult<()> {
    let length = name.chars().count();
    if length == 0 || length > MAX_KEYWORD_NAME_LENGTH {
        return Err(SchemaError::invalid_keyword_name(
            name,
            &format!("length must be 1..={}", MAX_KEYWORD_NAME_LENGTH),
        ));
    }

    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Err(SchemaError::invalid_keyword_name(
            name,
            "must start with an upper-case letter",
        ));
    }

    if !chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-') {
        return Err(SchemaError::invalid_keyword_name(
            name,
            "only upper-case letters, digits, '_' and '-' are allowed",
        ));
    }

    Ok(())
}
