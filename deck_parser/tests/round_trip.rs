use deck_parser::config::ParserPreferences;
use deck_parser::parser::{parse_record, record_from_values};
use deck_parser::schema::{ItemType, ParserItem, ParserRecord};
use deck_parser::utils::KeywordLocation;
use deck_parser::{
    DeckOutput, DeckRecord, DeckValue, Dimension, KeywordRegistry, Parser, RawRecord, UDAValue,
    UnitSystem, ValueStatus,
};
use proptest::prelude::*;

fn well_schema() -> ParserRecord {
    ParserRecord::from_items(vec![
        ParserItem::new("WELL", ItemType::String),
        ParserItem::new("GROUP", ItemType::String).with_default("FIELD"),
        ParserItem::new("COUNT", ItemType::Int).with_default(1),
        ParserItem::new("RATE", ItemType::Double)
            .with_default(0.0)
            .with_dimension("LiquidSurfaceVolume/Time"),
        ParserItem::new("TARGET", ItemType::Uda).with_dimension("Pressure"),
        ParserItem::new("VALUES", ItemType::Double).all(),
    ])
    .expect("valid schema")
}

fn location() -> KeywordLocation {
    KeywordLocation::new("WELLDATA", "<memory>", 1)
}

fn written(record: &DeckRecord) -> String {
    let mut out = DeckOutput::new();
    record.write(&mut out);
    out.into_string()
}

fn reparse(schema: &ParserRecord, text: &str) -> DeckRecord {
    let metric = UnitSystem::new_metric();
    let raw = RawRecord::from_text(text, location()).expect("tokenize");
    parse_record(schema, raw, &metric, &metric).expect("parse")
}

// ============================================================================
// STRATEGIES
// ============================================================================

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Z0-9 _']{0,7}").unwrap()
}

fn double() -> impl Strategy<Value = f64> {
    prop_oneof![-1.0e6..1.0e6f64, -1.0e-3..1.0e-3f64]
}

fn maybe(value: impl Strategy<Value = DeckValue>) -> impl Strategy<Value = DeckValue> {
    prop_oneof![1 => Just(DeckValue::Unset), 3 => value]
}

fn well_values() -> impl Strategy<Value = Vec<DeckValue>> {
    let uda = prop_oneof![
        double().prop_map(DeckValue::from),
        word().prop_map(DeckValue::from),
    ];
    (
        word().prop_map(DeckValue::from),
        maybe(word().prop_map(DeckValue::from)),
        maybe(any::<i32>().prop_map(DeckValue::from)),
        maybe(double().prop_map(DeckValue::from)),
        maybe(uda),
        proptest::collection::vec(maybe(double().prop_map(DeckValue::from)), 0..40),
    )
        .prop_map(|(well, group, count, rate, target, values)| {
            let mut all = vec![well, group, count, rate, target];
            all.extend(values);
            all
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn records_survive_write_then_parse(values in well_values()) {
        let schema = well_schema();
        let metric = UnitSystem::new_metric();
        let record = record_from_values(&schema, &values, &metric, &metric).expect("build");

        let text = written(&record);
        let parsed = reparse(&schema, &text);
        prop_assert!(record.equal(&parsed, true, true), "text: {}", text);
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn end_to_end_record() {
    let schema = ParserRecord::from_items(vec![
        ParserItem::new("NAME", ItemType::String),
        ParserItem::new("RATE", ItemType::Double).with_default(0.0),
        ParserItem::new("LIMIT", ItemType::Double).all(),
    ])
    .unwrap();
    let metric = UnitSystem::new_metric();
    let raw = RawRecord::from_tokens(["OIL", "1*", "2*3.0"], location());
    let record = parse_record(&schema, raw, &metric, &metric).unwrap();

    assert_eq!(record.size(), 3);
    assert_eq!(record.get_item("NAME").and_then(|i| i.get::<String>(0)), Ok("OIL".to_string()));

    let rate = record.get_item("RATE").unwrap();
    assert_eq!(rate.get::<f64>(0), Ok(0.0));
    assert_eq!(rate.value_status(0), Ok(ValueStatus::ValidDefault));
    assert_eq!(rate.default_applied(0), Ok(true));

    let limit = record.get_item("LIMIT").unwrap();
    assert_eq!(limit.get_data::<f64>(), Ok(vec![3.0, 3.0]));
    assert_eq!(limit.default_applied(1), Ok(false));

    assert_eq!(record, reparse(&schema, &written(&record)));
}

#[test]
fn repeat_counts_expand() {
    let schema = ParserRecord::from_items(vec![ParserItem::new("V", ItemType::Double).all()]).unwrap();

    let defaults = reparse(&schema, "3* /");
    let item = defaults.get_data_item().unwrap();
    assert_eq!(item.size(), 3);
    assert!((0..3).all(|i| item.value_status(i) == Ok(ValueStatus::EmptyDefault)));
    assert!(item.get::<f64>(0).is_err());

    let values = reparse(&schema, "3*1.5 /");
    let item = values.get_data_item().unwrap();
    assert_eq!(item.get_data::<f64>(), Ok(vec![1.5, 1.5, 1.5]));
    assert!((0..3).all(|i| item.value_status(i) == Ok(ValueStatus::DeckValue)));
}

#[test]
fn int_widens_to_double_only() {
    assert_eq!(DeckValue::from(5).get::<f64>(), Ok(5.0));
    assert!(DeckValue::from(5.0).get::<i32>().is_err());
}

#[test]
fn uda_si_conversion() {
    let value = UDAValue::with_dimension(10.0, Dimension::new(0.001, 0.0));
    assert!((value.get_si().unwrap() - 0.01).abs() < 1e-15);
}

#[test]
fn status_predicates() {
    assert!(!ValueStatus::DeckValue.defaulted());
    assert!(ValueStatus::EmptyDefault.defaulted());
    assert!(ValueStatus::ValidDefault.defaulted());
    assert!(ValueStatus::DeckValue.has_value());
    assert!(ValueStatus::ValidDefault.has_value());
    assert!(!ValueStatus::EmptyDefault.has_value());
    assert!(!ValueStatus::Uninitialized.has_value());
}

#[test]
fn equality_can_ignore_default_status() {
    let schema = ParserRecord::from_items(vec![ParserItem::new("N", ItemType::Int).with_default(4)]).unwrap();
    let defaulted = reparse(&schema, "1* /");
    let explicit = reparse(&schema, "4 /");

    assert!(!defaulted.equal(&explicit, true, true));
    assert!(defaulted.equal(&explicit, false, true));
}

#[test]
fn deck_text_round_trip() {
    let mut registry = KeywordRegistry::with_builtin_keywords();
    registry
        .extend_from_json_str(
            r#"[
                {
                    "name": "WCONPROD",
                    "size": "slash_terminated",
                    "records": [[
                        {"name": "WELL", "value_type": "STRING"},
                        {"name": "STATUS", "value_type": "STRING", "default": "OPEN"},
                        {"name": "ORAT", "value_type": "UDA", "dimension": "LiquidSurfaceVolume/Time"},
                        {"name": "BHP", "value_type": "DOUBLE", "default": 1, "dimension": "Pressure"}
                    ]]
                },
                {
                    "name": "PORO",
                    "size": {"fixed": 1},
                    "is_data_keyword": true,
                    "records": [[{"name": "DATA", "value_type": "DOUBLE", "size": "ALL"}]]
                }
            ]"#,
        )
        .unwrap();
    let parser = Parser::with_registry(registry).with_preferences(ParserPreferences::strict());

    let text = "\
FIELD
GRID
PORO
  0.2 3*0.25 1* 0.3 /
SCHEDULE
WCONPROD
  'OP 1' 1* 'FUOPR' 2500 /
  'OP2' SHUT 1200.5 /
/
";
    let deck = parser.parse_string(text).unwrap();
    let again = parser.parse_string(&deck.to_string()).unwrap();

    assert_eq!(deck.size(), again.size());
    for (first, second) in deck.iter().zip(again.iter()) {
        assert_eq!(first.name(), second.name());
        assert_eq!(first.size(), second.size());
        assert!(first.iter().zip(second.iter()).all(|(a, b)| a.equal(b, true, true)));
    }

    let bhp = again
        .get_keyword("WCONPROD", 0)
        .and_then(|k| k.get_record(0))
        .and_then(|r| r.get_item("BHP"))
        .and_then(|i| i.get_si_double(0))
        .unwrap();
    assert!((bhp - 2500.0 * 6894.757293168361).abs() < 1e-6);
}
