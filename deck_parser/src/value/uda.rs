//! User-defined-argument values
//!
//! A `UDAValue` is either a number or a string naming a quantity that will be
//! resolved later. Numbers carry the `Dimension` they were read in so the SI
//! value can be computed on demand.

use super::deck_value::quote;
use super::error::{ValueError, ValueResult};
use crate::units::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UDAPayload {
    Numeric(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UDAValue {
    payload: UDAPayload,
    dimension: Dimension,
}

impl UDAValue {
    pub fn with_dimension(value: impl Into<UDAValue>, dimension: Dimension) -> Self {
        let mut uda = value.into();
        uda.dimension = dimension;
        uda
    }

    pub fn payload(&self) -> &UDAPayload {
        &self.payload
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn set_dimension(&mut self, dimension: Dimension) {
        self.dimension = dimension;
    }

    pub fn get<T: FromUDAValue>(&self) -> ValueResult<T> {
        T::from_uda(self).ok_or_else(|| ValueError::type_mismatch(T::TYPE_NAME, self.value_type()))
    }

    pub fn is<T: FromUDAValue>(&self) -> bool {
        T::from_uda(self).is_some()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.payload, UDAPayload::Numeric(_))
    }

    pub fn value_type(&self) -> &'static str {
        match self.payload {
            UDAPayload::Numeric(_) => "double",
            UDAPayload::Text(_) => "string",
        }
    }

    pub fn assert_numeric(&self) -> ValueResult<f64> {
        match &self.payload {
            UDAPayload::Numeric(v) => Ok(*v),
            UDAPayload::Text(s) => Err(ValueError::not_numeric(s)),
        }
    }

    /// Numeric value converted to SI through the attached dimension
    pub fn get_si(&self) -> ValueResult<f64> {
        self.assert_numeric()
            .map(|raw| self.dimension.convert_raw_to_si(raw))
    }

    /// Exact comparison: 0 is the unset sentinel for numeric UDAs
    pub fn zero(&self) -> bool {
        matches!(self.payload, UDAPayload::Numeric(v) if v == 0.0)
    }

    /// Replace the payload, keeping the dimension
    pub fn reset(&mut self, value: impl Into<UDAPayload>) {
        self.payload = value.into();
    }
}

impl Default for UDAValue {
    fn default() -> Self {
        Self {
            payload: UDAPayload::Text(String::new()),
            dimension: Dimension::identity(),
        }
    }
}

impl PartialEq for UDAValue {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl From<f64> for UDAPayload {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<String> for UDAPayload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for UDAPayload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<UDAPayload> for UDAValue {
    fn from(payload: UDAPayload) -> Self {
        Self {
            payload,
            dimension: Dimension::identity(),
        }
    }
}

impl From<f64> for UDAValue {
    fn from(value: f64) -> Self {
        UDAPayload::from(value).into()
    }
}

impl From<String> for UDAValue {
    fn from(value: String) -> Self {
        UDAPayload::from(value).into()
    }
}

impl From<&str> for UDAValue {
    fn from(value: &str) -> Self {
        UDAPayload::from(value).into()
    }
}

impl fmt::Display for UDAValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            UDAPayload::Numeric(v) => write!(f, "{:?}", v),
            UDAPayload::Text(s) => f.write_str(&quote(s)),
        }
    }
}

pub trait FromUDAValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_uda(value: &UDAValue) -> Option<Self>;
}

impl FromUDAValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_uda(value: &UDAValue) -> Option<Self> {
        match value.payload {
            UDAPayload::Numeric(v) => Some(v),
            UDAPayload::Text(_) => None,
        }
    }
}

impl FromUDAValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_uda(value: &UDAValue) -> Option<Self> {
        match &value.payload {
            UDAPayload::Text(s) => Some(s.clone()),
            UDAPayload::Numeric(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_is_non_numeric() {
        let uda = UDAValue::default();
        assert!(!uda.is_numeric());
        assert_eq!(uda.get::<String>(), Ok(String::new()));
        assert!(uda.dimension().is_identity());
    }

    #[test]
    fn test_get_si_uses_dimension() {
        let uda = UDAValue::with_dimension(10.0, Dimension::new(0.001, 0.0));
        let si = uda.get_si().unwrap();
        assert!((si - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_get_si_fails_on_string() {
        let uda = UDAValue::from("WUOPRL");
        assert_matches!(uda.get_si(), Err(ValueError::NotNumeric { .. }));
        assert!(uda.get::<f64>().is_err());
        assert!(uda.is::<String>());
    }

    #[test]
    fn test_zero_is_exact() {
        assert!(UDAValue::from(0.0).zero());
        assert!(!UDAValue::from(1e-300).zero());
        assert!(!UDAValue::from("0").zero());
    }

    #[test]
    fn test_reset_keeps_dimension() {
        let dim = Dimension::new(1e5, 0.0);
        let mut uda = UDAValue::with_dimension("GROUP_TARGET", dim);
        uda.reset(250.0);
        assert!(uda.is::<f64>());
        assert_eq!(uda.dimension(), dim);
        assert_eq!(uda.get_si(), Ok(250.0 * 1e5));

        uda.reset("BACK");
        assert_eq!(uda.get::<String>(), Ok("BACK".to_string()));
    }

    #[test]
    fn test_equality_ignores_dimension() {
        let a = UDAValue::with_dimension(3.0, Dimension::new(1e5, 0.0));
        let b = UDAValue::from(3.0);
        assert_eq!(a, b);
        assert_ne!(a, UDAValue::from("3.0"));
    }

    #[test]
    fn test_display_quotes_text() {
        assert_eq!(UDAValue::from(2.5).to_string(), "2.5");
        assert_eq!(UDAValue::from("FUOPR").to_string(), "'FUOPR'");
        assert_eq!(UDAValue::from("O'NEIL").to_string(), "\"O'NEIL\"");
    }
}
