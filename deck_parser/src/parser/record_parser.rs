//! RawRecord to DeckRecord
//!
//! Each schema item takes tokens from the front of the raw record. A SINGLE
//! item takes one token; when that token is a repeat token (`N*` or
//! `N*value`) the remaining `N-1` repetitions go back to the front of the
//! record for the following items. An ALL item takes every remaining token.
//!
//! Explicit values get the dimension of the active unit system, defaults the
//! dimension of the default unit system, since schema defaults are written in
//! METRIC units.

use super::error::{ParseError, ParseResult};
use crate::config::compile_time::raw_record::{MAX_REPEAT_COUNT, MAX_TOKENS_PER_RECORD};
use crate::config::InputErrorAction;
use crate::deck::{DeckItem, DeckRecord};
use crate::logging::codes;
use crate::log_warning;
use crate::raw::RawRecord;
use crate::schema::{ItemType, ParserItem, ParserRecord};
use crate::units::{Dimension, UnitSystem};
use crate::utils::KeywordLocation;
use crate::value::{DeckValue, UDAValue, ValueStatus};

/// A raw token after repeat-count classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarToken<'a> {
    Plain(&'a str),
    /// `N*`
    Defaults(usize),
    /// `N*value`
    Repeated(usize, &'a str),
}

/// A token is a repeat token only when digits come directly before its
/// first `*`; anything else, such as `OP*`, is a plain value
pub fn classify_token<'a>(token: &'a str, location: &KeywordLocation) -> ParseResult<StarToken<'a>> {
    if token.starts_with('\'') || token.starts_with('"') {
        return Ok(StarToken::Plain(token));
    }

    let Some((count, value)) = token.split_once('*') else {
        return Ok(StarToken::Plain(token));
    };
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(StarToken::Plain(token));
    }

    let count = match count.parse::<usize>() {
        Ok(count) if count > 0 && count <= MAX_REPEAT_COUNT => count,
        _ => return Err(ParseError::invalid_repeat_count(token, location)),
    };

    if value.is_empty() {
        Ok(StarToken::Defaults(count))
    } else {
        Ok(StarToken::Repeated(count, value))
    }
}

// ============================================================================
// VALUE PARSING
// ============================================================================

#[derive(Debug, Clone)]
enum TypedValue {
    Int(i32),
    Double(f64),
    String(String),
    Uda(UDAValue),
}

impl TypedValue {
    fn push_into(self, item: &mut DeckItem, status: ValueStatus, dimension: Dimension) -> ParseResult<()> {
        match self {
            Self::Int(v) => item.push(v, status, dimension)?,
            Self::Double(v) => item.push(v, status, dimension)?,
            Self::String(v) => item.push(v, status, dimension)?,
            Self::Uda(v) => item.push(v, status, dimension)?,
        }
        Ok(())
    }
}

/// Doubles accept a Fortran `D` exponent
pub fn parse_double(token: &str) -> Option<f64> {
    let valid = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | 'd' | 'D'));
    if !valid || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.replace(['d', 'D'], "e").parse::<f64>().ok()
}

pub fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            return &token[1..token.len() - 1];
        }
    }
    token
}

fn parse_token(schema: &ParserItem, token: &str, location: &KeywordLocation) -> ParseResult<TypedValue> {
    let invalid = || ParseError::invalid_value(token, &schema.name, schema.item_type.as_str(), location);
    match schema.item_type {
        ItemType::Int => token.parse::<i32>().map(TypedValue::Int).map_err(|_| invalid()),
        ItemType::Double => parse_double(token).map(TypedValue::Double).ok_or_else(invalid),
        ItemType::String => Ok(TypedValue::String(strip_quotes(token).to_string())),
        ItemType::Uda => Ok(TypedValue::Uda(match parse_double(token) {
            Some(v) => UDAValue::from(v),
            None => UDAValue::from(strip_quotes(token)),
        })),
    }
}

/// Convert a typed value to the item's type, widening ints for numeric items
fn convert_value(schema: &ParserItem, value: &DeckValue) -> ParseResult<Option<TypedValue>> {
    if value.is_default() {
        return Ok(None);
    }
    let typed = match schema.item_type {
        ItemType::Int => TypedValue::Int(value.get::<i32>()?),
        ItemType::Double => TypedValue::Double(value.get::<f64>()?),
        ItemType::String => TypedValue::String(value.get::<String>()?),
        ItemType::Uda => TypedValue::Uda(match value {
            DeckValue::String(s) => UDAValue::from(s.as_str()),
            other => UDAValue::from(other.get::<f64>()?),
        }),
    };
    Ok(Some(typed))
}

// ============================================================================
// ITEM CONSTRUCTION
// ============================================================================

struct ItemContext<'a> {
    schema: &'a ParserItem,
    default: Option<TypedValue>,
    active_dimension: Dimension,
    default_dimension: Dimension,
}

impl<'a> ItemContext<'a> {
    fn new(schema: &'a ParserItem, active: &UnitSystem, default: &UnitSystem) -> ParseResult<Self> {
        let (active_dimension, default_dimension) = match &schema.dimension {
            Some(dimension) if schema.item_type.is_numeric() => (
                active.get_dimension(dimension)?,
                default.get_dimension(dimension)?,
            ),
            _ => (Dimension::identity(), Dimension::identity()),
        };

        let default = match schema.default_value() {
            Some(value) => convert_value(schema, value)?,
            None => None,
        };

        Ok(Self {
            schema,
            default,
            active_dimension,
            default_dimension,
        })
    }

    fn push_value(&self, item: &mut DeckItem, value: TypedValue) -> ParseResult<()> {
        value.push_into(item, ValueStatus::DeckValue, self.active_dimension)
    }

    fn push_default(&self, item: &mut DeckItem) -> ParseResult<()> {
        match &self.default {
            Some(value) => value
                .clone()
                .push_into(item, ValueStatus::ValidDefault, self.default_dimension),
            None => {
                item.push_empty_default(self.default_dimension);
                Ok(())
            }
        }
    }
}

fn parse_single_item(context: &ItemContext, raw: &mut RawRecord) -> ParseResult<DeckItem> {
    let mut item = DeckItem::from_schema(context.schema);
    let location = raw.location().clone();

    let Some(token) = raw.pop_front() else {
        context.push_default(&mut item)?;
        return Ok(item);
    };

    match classify_token(&token, &location)? {
        StarToken::Plain(text) => {
            context.push_value(&mut item, parse_token(context.schema, text, &location)?)?;
        }
        StarToken::Defaults(count) => {
            context.push_default(&mut item)?;
            raw.prepend(count - 1, "");
        }
        StarToken::Repeated(count, text) => {
            context.push_value(&mut item, parse_token(context.schema, text, &location)?)?;
            raw.prepend(count - 1, text);
        }
    }

    Ok(item)
}

fn parse_all_item(context: &ItemContext, raw: &mut RawRecord) -> ParseResult<DeckItem> {
    let mut item = DeckItem::from_schema(context.schema);
    let location = raw.location().clone();

    while let Some(token) = raw.pop_front() {
        let star = classify_token(&token, &location)?;
        let slots = match star {
            StarToken::Plain(_) => 1,
            StarToken::Defaults(count) | StarToken::Repeated(count, _) => count,
        };
        if item.size() + slots > MAX_TOKENS_PER_RECORD {
            return Err(ParseError::TooManyTokens {
                max: MAX_TOKENS_PER_RECORD,
                location,
            });
        }

        match star {
            StarToken::Plain(text) => {
                context.push_value(&mut item, parse_token(context.schema, text, &location)?)?;
            }
            StarToken::Defaults(count) => {
                for _ in 0..count {
                    context.push_default(&mut item)?;
                }
            }
            StarToken::Repeated(count, text) => {
                let value = parse_token(context.schema, text, &location)?;
                for _ in 0..count {
                    context.push_value(&mut item, value.clone())?;
                }
            }
        }
    }

    Ok(item)
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a record, rejecting left-over tokens
pub fn parse_record(
    schema: &ParserRecord,
    raw: RawRecord,
    active: &UnitSystem,
    default: &UnitSystem,
) -> ParseResult<DeckRecord> {
    parse_record_with(schema, raw, active, default, InputErrorAction::Throw)
}

pub fn parse_record_with(
    schema: &ParserRecord,
    mut raw: RawRecord,
    active: &UnitSystem,
    default: &UnitSystem,
    extra_data: InputErrorAction,
) -> ParseResult<DeckRecord> {
    let mut record = DeckRecord::new();

    for item_schema in schema.iter() {
        let context = ItemContext::new(item_schema, active, default)?;
        let item = if item_schema.is_all() {
            parse_all_item(&context, &mut raw)?
        } else {
            parse_single_item(&context, &mut raw)?
        };
        record.add_item(item)?;
    }

    if !raw.is_empty() {
        let count = raw.len();
        match extra_data {
            InputErrorAction::Throw => {
                return Err(ParseError::ExtraData {
                    count,
                    location: raw.location().clone(),
                })
            }
            InputErrorAction::Warn => {
                let location = raw.location().to_string();
                log_warning!(
                    code = codes::warnings::EXTRA_DATA_IGNORED,
                    "Ignoring values after the last item",
                    "count" => count,
                    "location" => location
                );
            }
            InputErrorAction::Ignore => {}
        }
    }

    Ok(record)
}

/// Build a record from typed values; `DeckValue::Unset` marks a defaulted slot
pub fn record_from_values(
    schema: &ParserRecord,
    values: &[DeckValue],
    active: &UnitSystem,
    default: &UnitSystem,
) -> ParseResult<DeckRecord> {
    let mut record = DeckRecord::new();
    let mut remaining = values.iter();

    for item_schema in schema.iter() {
        let context = ItemContext::new(item_schema, active, default)?;
        let mut item = DeckItem::from_schema(item_schema);

        let take = if item_schema.is_all() { usize::MAX } else { 1 };
        let mut taken = 0;
        while taken < take {
            let Some(value) = remaining.next() else {
                break;
            };
            match convert_value(item_schema, value)? {
                Some(typed) => context.push_value(&mut item, typed)?,
                None => context.push_default(&mut item)?,
            }
            taken += 1;
        }

        if taken == 0 && !item_schema.is_all() {
            context.push_default(&mut item)?;
        }

        record.add_item(item)?;
    }

    let extra = remaining.count();
    if extra > 0 {
        return Err(ParseError::ExtraData {
            count: extra,
            location: KeywordLocation::synthetic("<values>"),
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn location() -> KeywordLocation {
        KeywordLocation::new("TEST", "<memory>", 1)
    }

    fn raw(text: &str) -> RawRecord {
        RawRecord::from_text(text, location()).unwrap()
    }

    fn oil_schema() -> ParserRecord {
        ParserRecord::from_items(vec![
            ParserItem::new("NAME", ItemType::String),
            ParserItem::new("RATE", ItemType::Double).with_default(0.0),
            ParserItem::new("LIMIT", ItemType::Double).all(),
        ])
        .unwrap()
    }

    fn metric() -> UnitSystem {
        UnitSystem::new_metric()
    }

    #[test]
    fn test_classify_token() {
        let loc = location();
        assert_eq!(classify_token("12", &loc).unwrap(), StarToken::Plain("12"));
        assert_eq!(classify_token("3*", &loc).unwrap(), StarToken::Defaults(3));
        assert_eq!(classify_token("2*1.5", &loc).unwrap(), StarToken::Repeated(2, "1.5"));
        assert_eq!(classify_token("'A*B'", &loc).unwrap(), StarToken::Plain("'A*B'"));
        assert_eq!(classify_token("OP*", &loc).unwrap(), StarToken::Plain("OP*"));
        assert_eq!(classify_token("x*2", &loc).unwrap(), StarToken::Plain("x*2"));
        assert_eq!(classify_token("*", &loc).unwrap(), StarToken::Plain("*"));
        assert_eq!(classify_token("-1*", &loc).unwrap(), StarToken::Plain("-1*"));
        assert_matches!(classify_token("0*", &loc), Err(ParseError::InvalidRepeatCount { .. }));
        assert_matches!(
            classify_token("99999999999999999999999*", &loc),
            Err(ParseError::InvalidRepeatCount { .. })
        );
    }

    #[test]
    fn test_star_inside_plain_values() {
        let schema = ParserRecord::from_items(vec![
            ParserItem::new("WELL", ItemType::String),
            ParserItem::new("RATE", ItemType::Double),
        ])
        .unwrap();
        let record = parse_record(&schema, raw("OP* 2.0 /"), &metric(), &metric()).unwrap();
        assert_eq!(record.get_item("WELL").and_then(|i| i.get::<String>(0)), Ok("OP*".to_string()));

        assert_matches!(
            parse_record(&schema, raw("OP1 *"), &metric(), &metric()),
            Err(ParseError::InvalidValue { expected: "DOUBLE", .. })
        );
    }

    #[test]
    fn test_apostrophe_string_round_trip() {
        let schema = ParserRecord::from_items(vec![ParserItem::new("WELL", ItemType::String)]).unwrap();
        let record = parse_record(&schema, raw("\"O'NEIL\" /"), &metric(), &metric()).unwrap();
        assert_eq!(record.get_item("WELL").and_then(|i| i.get::<String>(0)), Ok("O'NEIL".to_string()));

        let text = record.to_string();
        let again = parse_record(&schema, raw(&text), &metric(), &metric()).unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn test_repeat_expansion_is_capped() {
        let schema = ParserRecord::from_items(vec![ParserItem::new("V", ItemType::Double).all()]).unwrap();
        let token = format!("{}*", MAX_TOKENS_PER_RECORD + 1);
        assert_matches!(
            parse_record(&schema, raw(&token), &metric(), &metric()),
            Err(ParseError::TooManyTokens { .. } | ParseError::InvalidRepeatCount { .. })
        );
    }

    #[test]
    fn test_parse_double_forms() {
        assert_eq!(parse_double("1.5"), Some(1.5));
        assert_eq!(parse_double("1.5D2"), Some(150.0));
        assert_eq!(parse_double("-2e-1"), Some(-0.2));
        assert_eq!(parse_double(".5"), Some(0.5));
        assert_eq!(parse_double("inf"), None);
        assert_eq!(parse_double("1.2.3"), None);
        assert_eq!(parse_double("-"), None);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'OP 1'"), "OP 1");
        assert_eq!(strip_quotes("\"X\""), "X");
        assert_eq!(strip_quotes("'"), "'");
        assert_eq!(strip_quotes("PLAIN"), "PLAIN");
    }

    #[test]
    fn test_end_to_end_record() {
        let record = parse_record(&oil_schema(), raw("OIL 1* 2*3.0 /"), &metric(), &metric()).unwrap();

        let name = record.get_item("NAME").unwrap();
        assert_eq!(name.get::<String>(0), Ok("OIL".to_string()));
        assert_eq!(name.value_status(0), Ok(ValueStatus::DeckValue));

        let rate = record.get_item("RATE").unwrap();
        assert_eq!(rate.size(), 1);
        assert_eq!(rate.value_status(0), Ok(ValueStatus::ValidDefault));
        assert_eq!(rate.get::<f64>(0), Ok(0.0));

        let limit = record.get_item("LIMIT").unwrap();
        assert_eq!(limit.size(), 2);
        assert_eq!(limit.get_data::<f64>(), Ok(vec![3.0, 3.0]));
        assert_eq!(limit.value_status(1), Ok(ValueStatus::DeckValue));
    }

    #[test]
    fn test_defaults_span_items() {
        let schema = ParserRecord::from_items(vec![
            ParserItem::new("A", ItemType::Int),
            ParserItem::new("B", ItemType::Int).with_default(7),
            ParserItem::new("C", ItemType::Int),
            ParserItem::new("D", ItemType::Int),
        ])
        .unwrap();

        let record = parse_record(&schema, raw("3* 4"), &metric(), &metric()).unwrap();
        let status = |name: &str| record.get_item(name).and_then(|i| i.value_status(0));
        assert_eq!(status("A"), Ok(ValueStatus::EmptyDefault));
        assert_eq!(status("B"), Ok(ValueStatus::ValidDefault));
        assert_eq!(status("C"), Ok(ValueStatus::EmptyDefault));
        assert_eq!(record.get_item("D").and_then(|i| i.get::<i32>(0)), Ok(4));

        let repeated = parse_record(&schema, raw("4*9"), &metric(), &metric()).unwrap();
        for item in repeated.iter() {
            assert_eq!(item.get::<i32>(0), Ok(9));
        }
    }

    #[test]
    fn test_missing_tokens_default_single_items() {
        let record = parse_record(&oil_schema(), raw("GAS"), &metric(), &metric()).unwrap();
        assert_eq!(record.get_item("RATE").and_then(|i| i.get::<f64>(0)), Ok(0.0));
        assert_eq!(record.get_item("LIMIT").map(|i| i.size()), Ok(0));
    }

    #[test]
    fn test_repeat_expansion_in_all_item() {
        let schema = ParserRecord::from_items(vec![ParserItem::new("V", ItemType::Double).all()]).unwrap();

        let defaults = parse_record(&schema, raw("3*"), &metric(), &metric()).unwrap();
        let item = defaults.get_data_item().unwrap();
        assert_eq!(item.size(), 3);
        for index in 0..3 {
            assert_eq!(item.value_status(index), Ok(ValueStatus::EmptyDefault));
        }

        let values = parse_record(&schema, raw("3*1.5"), &metric(), &metric()).unwrap();
        assert_eq!(values.get_data_item().and_then(|i| i.get_data::<f64>()), Ok(vec![1.5; 3]));
    }

    #[test]
    fn test_invalid_values() {
        let schema = ParserRecord::from_items(vec![ParserItem::new("N", ItemType::Int)]).unwrap();
        assert_matches!(
            parse_record(&schema, raw("1.5"), &metric(), &metric()),
            Err(ParseError::InvalidValue { expected: "INT", .. })
        );
        assert_matches!(
            parse_record(&schema, raw("2*x"), &metric(), &metric()),
            Err(ParseError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_extra_data_policy() {
        let schema = ParserRecord::from_items(vec![ParserItem::new("N", ItemType::Int)]).unwrap();
        assert_matches!(
            parse_record(&schema, raw("1 2 3"), &metric(), &metric()),
            Err(ParseError::ExtraData { count: 2, .. })
        );

        let record =
            parse_record_with(&schema, raw("1 2 3"), &metric(), &metric(), InputErrorAction::Ignore).unwrap();
        assert_eq!(record.get_item("N").and_then(|i| i.get::<i32>(0)), Ok(1));
    }

    #[test]
    fn test_dimensions_follow_unit_systems() {
        let schema = ParserRecord::from_items(vec![
            ParserItem::new("DEPTH", ItemType::Double).with_dimension("Length"),
            ParserItem::new("PRESSURE", ItemType::Double)
                .with_default(100.0)
                .with_dimension("Pressure"),
        ])
        .unwrap();

        let field = UnitSystem::new_field();
        let record = parse_record(&schema, raw("1000"), &field, &metric()).unwrap();

        let depth = record.get_item("DEPTH").and_then(|i| i.get_si_double(0)).unwrap();
        assert!((depth - 304.8).abs() < 1e-9);

        // Defaults are METRIC values
        let pressure = record.get_item("PRESSURE").and_then(|i| i.get_si_double(0)).unwrap();
        assert_eq!(pressure, 100.0 * 1e5);
    }

    #[test]
    fn test_uda_items() {
        let schema = ParserRecord::from_items(vec![
            ParserItem::new("ORAT", ItemType::Uda).with_dimension("LiquidSurfaceVolume/Time"),
            ParserItem::new("WRAT", ItemType::Uda).with_dimension("LiquidSurfaceVolume/Time"),
        ])
        .unwrap();

        let record = parse_record(&schema, raw("86400 'FUOPR'"), &metric(), &metric()).unwrap();
        let orat = record.get_item("ORAT").unwrap();
        assert!((orat.get_si_double(0).unwrap() - 1.0).abs() < 1e-12);

        let wrat = record.get_item("WRAT").and_then(|i| i.get::<UDAValue>(0)).unwrap();
        assert_eq!(wrat.get::<String>(), Ok("FUOPR".to_string()));
    }

    #[test]
    fn test_record_from_values() {
        let values = vec![
            DeckValue::from("OIL"),
            DeckValue::Unset,
            DeckValue::from(3),
            DeckValue::from(4.5),
        ];
        let record = record_from_values(&oil_schema(), &values, &metric(), &metric()).unwrap();

        assert_eq!(record.get_item("RATE").and_then(|i| i.value_status(0)), Ok(ValueStatus::ValidDefault));
        assert_eq!(
            record.get_item("LIMIT").and_then(|i| i.get_data::<f64>()),
            Ok(vec![3.0, 4.5])
        );

        let wrong = vec![DeckValue::from(1)];
        assert_matches!(
            record_from_values(&oil_schema(), &wrong, &metric(), &metric()),
            Err(ParseError::Value(_))
        );
    }
}
