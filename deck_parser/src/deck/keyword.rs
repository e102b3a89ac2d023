//! `DeckKeyword`: a keyword occurrence and its records

use super::error::{DeckError, DeckResult};
use super::output::DeckOutput;
use super::record::DeckRecord;
use crate::schema::ParserKeyword;
use crate::utils::KeywordLocation;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct DeckKeyword {
    name: String,
    location: KeywordLocation,
    records: Vec<DeckRecord>,
    is_data_keyword: bool,
    slash_terminated: bool,
}

impl DeckKeyword {
    pub fn new(location: KeywordLocation) -> Self {
        Self {
            name: location.keyword.clone(),
            location,
            records: Vec::new(),
            is_data_keyword: false,
            slash_terminated: false,
        }
    }

    pub fn from_schema(schema: &ParserKeyword, location: KeywordLocation) -> Self {
        Self {
            name: schema.name().to_string(),
            location,
            records: Vec::new(),
            is_data_keyword: schema.is_data_keyword(),
            slash_terminated: schema.is_slash_terminated(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &KeywordLocation {
        &self.location
    }

    pub fn is_data_keyword(&self) -> bool {
        self.is_data_keyword
    }

    pub fn is_slash_terminated(&self) -> bool {
        self.slash_terminated
    }

    pub fn add_record(&mut self, record: DeckRecord) {
        self.records.push(record);
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn get_record(&self, index: usize) -> DeckResult<&DeckRecord> {
        self.records
            .get(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, self.records.len(), &self.name))
    }

    pub fn get_record_mut(&mut self, index: usize) -> DeckResult<&mut DeckRecord> {
        let size = self.records.len();
        self.records
            .get_mut(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, size, &self.name))
    }

    pub fn get_data_record(&self) -> DeckResult<&DeckRecord> {
        if !self.is_data_keyword {
            return Err(DeckError::not_data_record(&format!(
                "{} is not a data keyword",
                self.name
            )));
        }
        self.get_record(0)
    }

    /// SI values of a data keyword
    pub fn get_si_double_data(&self) -> DeckResult<Vec<f64>> {
        self.get_data_record()?.get_data_item()?.get_si_double_data()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckRecord> {
        self.records.iter()
    }

    pub fn write(&self, out: &mut DeckOutput) {
        out.start_keyword(&self.name);
        for record in &self.records {
            record.write(out);
        }
        out.end_keyword(self.slash_terminated);
    }
}

impl fmt::Display for DeckKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = DeckOutput::new();
        self.write(&mut out);
        f.write_str(out.as_str())
    }
}
