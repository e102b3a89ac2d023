//! `DeckItem`: the typed values of one schema item within one record
//!
//! Every slot keeps its value, its status and the `Dimension` it was read
//! in. Raw values are stored as written; the SI getters convert on demand.

use super::error::{DeckError, DeckResult};
use super::output::DeckOutput;
use crate::schema::{ItemSize, ItemType, ParserItem};
use crate::units::Dimension;
use crate::value::{quote, UDAPayload, UDAValue, ValueStatus};
use std::fmt;

/// Absolute and relative tolerance for numeric comparison
const NUMERIC_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    pub value: T,
    pub status: ValueStatus,
    pub dimension: Dimension,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemData {
    Int(Vec<Slot<i32>>),
    Double(Vec<Slot<f64>>),
    String(Vec<Slot<String>>),
    Uda(Vec<Slot<UDAValue>>),
}

impl ItemData {
    fn empty(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Int => Self::Int(Vec::new()),
            ItemType::Double => Self::Double(Vec::new()),
            ItemType::String => Self::String(Vec::new()),
            ItemType::Uda => Self::Uda(Vec::new()),
        }
    }

    fn item_type(&self) -> ItemType {
        match self {
            Self::Int(_) => ItemType::Int,
            Self::Double(_) => ItemType::Double,
            Self::String(_) => ItemType::String,
            Self::Uda(_) => ItemType::Uda,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Int(slots) => slots.len(),
            Self::Double(slots) => slots.len(),
            Self::String(slots) => slots.len(),
            Self::Uda(slots) => slots.len(),
        }
    }

    fn status(&self, index: usize) -> Option<ValueStatus> {
        match self {
            Self::Int(slots) => slots.get(index).map(|s| s.status),
            Self::Double(slots) => slots.get(index).map(|s| s.status),
            Self::String(slots) => slots.get(index).map(|s| s.status),
            Self::Uda(slots) => slots.get(index).map(|s| s.status),
        }
    }
}

/// Rust types stored in a `DeckItem`
pub trait ItemValue: Clone + Default + fmt::Debug {
    const ITEM_TYPE: ItemType;

    fn slots(data: &ItemData) -> Option<&Vec<Slot<Self>>>;

    fn slots_mut(data: &mut ItemData) -> Option<&mut Vec<Slot<Self>>>;

    /// Deck text for an explicit value
    fn to_token(&self) -> String;

    fn attach_dimension(self, _dimension: Dimension) -> Self {
        self
    }
}

impl ItemValue for i32 {
    const ITEM_TYPE: ItemType = ItemType::Int;

    fn slots(data: &ItemData) -> Option<&Vec<Slot<Self>>> {
        match data {
            ItemData::Int(slots) => Some(slots),
            _ => None,
        }
    }

    fn slots_mut(data: &mut ItemData) -> Option<&mut Vec<Slot<Self>>> {
        match data {
            ItemData::Int(slots) => Some(slots),
            _ => None,
        }
    }

    fn to_token(&self) -> String {
        self.to_string()
    }
}

impl ItemValue for f64 {
    const ITEM_TYPE: ItemType = ItemType::Double;

    fn slots(data: &ItemData) -> Option<&Vec<Slot<Self>>> {
        match data {
            ItemData::Double(slots) => Some(slots),
            _ => None,
        }
    }

    fn slots_mut(data: &mut ItemData) -> Option<&mut Vec<Slot<Self>>> {
        match data {
            ItemData::Double(slots) => Some(slots),
            _ => None,
        }
    }

    fn to_token(&self) -> String {
        format!("{:?}", self)
    }
}

impl ItemValue for String {
    const ITEM_TYPE: ItemType = ItemType::String;

    fn slots(data: &ItemData) -> Option<&Vec<Slot<Self>>> {
        match data {
            ItemData::String(slots) => Some(slots),
            _ => None,
        }
    }

    fn slots_mut(data: &mut ItemData) -> Option<&mut Vec<Slot<Self>>> {
        match data {
            ItemData::String(slots) => Some(slots),
            _ => None,
        }
    }

    fn to_token(&self) -> String {
        quote(self)
    }
}

impl ItemValue for UDAValue {
    const ITEM_TYPE: ItemType = ItemType::Uda;

    fn slots(data: &ItemData) -> Option<&Vec<Slot<Self>>> {
        match data {
            ItemData::Uda(slots) => Some(slots),
            _ => None,
        }
    }

    fn slots_mut(data: &mut ItemData) -> Option<&mut Vec<Slot<Self>>> {
        match data {
            ItemData::Uda(slots) => Some(slots),
            _ => None,
        }
    }

    fn to_token(&self) -> String {
        self.to_string()
    }

    fn attach_dimension(mut self, dimension: Dimension) -> Self {
        self.set_dimension(dimension);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckItem {
    name: String,
    size: ItemSize,
    data: ItemData,
}

impl DeckItem {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            size: ItemSize::Single,
            data: ItemData::empty(item_type),
        }
    }

    pub fn from_schema(schema: &ParserItem) -> Self {
        Self {
            name: schema.name.clone(),
            size: schema.size,
            data: ItemData::empty(schema.item_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> ItemType {
        self.data.item_type()
    }

    pub fn is_all(&self) -> bool {
        self.size == ItemSize::All
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    // ------------------------------------------------------------------
    // construction
    // ------------------------------------------------------------------

    pub fn push<T: ItemValue>(
        &mut self,
        value: T,
        status: ValueStatus,
        dimension: Dimension,
    ) -> DeckResult<()> {
        let found = self.type_name();
        let slots = T::slots_mut(&mut self.data)
            .ok_or_else(|| DeckError::type_mismatch(&self.name, T::ITEM_TYPE.as_str(), found))?;
        slots.push(Slot {
            value: value.attach_dimension(dimension),
            status,
            dimension,
        });
        Ok(())
    }

    /// Defaulted slot with no value
    pub fn push_empty_default(&mut self, dimension: Dimension) {
        match &mut self.data {
            ItemData::Int(slots) => slots.push(empty_slot(dimension)),
            ItemData::Double(slots) => slots.push(empty_slot(dimension)),
            ItemData::String(slots) => slots.push(empty_slot(dimension)),
            ItemData::Uda(slots) => slots.push(empty_slot(dimension)),
        }
    }

    /// Resolve a UDA slot in place; the slot keeps its dimension
    pub fn set_uda(&mut self, index: usize, mut value: UDAValue) -> DeckResult<()> {
        let size = self.size();
        let found = self.type_name();
        let slots = UDAValue::slots_mut(&mut self.data)
            .ok_or_else(|| DeckError::type_mismatch(&self.name, "UDA", found))?;
        let slot = slots
            .get_mut(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, size, &self.name))?;
        value.set_dimension(slot.dimension);
        slot.value = value;
        slot.status = ValueStatus::DeckValue;
        Ok(())
    }

    // ------------------------------------------------------------------
    // access
    // ------------------------------------------------------------------

    fn type_name(&self) -> &'static str {
        self.item_type().as_str()
    }

    /// All slots, typed
    pub fn slots<T: ItemValue>(&self) -> DeckResult<&[Slot<T>]> {
        T::slots(&self.data)
            .map(Vec::as_slice)
            .ok_or_else(|| DeckError::type_mismatch(&self.name, T::ITEM_TYPE.as_str(), self.type_name()))
    }

    fn slot<T: ItemValue>(&self, index: usize) -> DeckResult<&Slot<T>> {
        let slots = self.slots::<T>()?;
        let slot = slots
            .get(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, slots.len(), &self.name))?;
        if slot.status.has_value() {
            Ok(slot)
        } else {
            Err(DeckError::ValueNotAvailable {
                item: self.name.clone(),
                index,
            })
        }
    }

    pub fn get<T: ItemValue>(&self, index: usize) -> DeckResult<T> {
        self.slot::<T>(index).map(|slot| slot.value.clone())
    }

    pub fn get_data<T: ItemValue>(&self) -> DeckResult<Vec<T>> {
        (0..self.size()).map(|index| self.get::<T>(index)).collect()
    }

    pub fn get_trimmed_string(&self, index: usize) -> DeckResult<String> {
        self.get::<String>(index).map(|s| s.trim().to_string())
    }

    pub fn get_si_double(&self, index: usize) -> DeckResult<f64> {
        match self.item_type() {
            ItemType::Double => {
                let slot = self.slot::<f64>(index)?;
                Ok(slot.dimension.convert_raw_to_si(slot.value))
            }
            ItemType::Uda => Ok(self.slot::<UDAValue>(index)?.value.get_si()?),
            _ => Err(DeckError::type_mismatch(&self.name, "DOUBLE", self.type_name())),
        }
    }

    pub fn get_si_double_data(&self) -> DeckResult<Vec<f64>> {
        (0..self.size()).map(|index| self.get_si_double(index)).collect()
    }

    pub fn get_raw_double_data(&self) -> DeckResult<Vec<f64>> {
        self.get_data::<f64>()
    }

    pub fn value_status(&self, index: usize) -> DeckResult<ValueStatus> {
        self.data
            .status(index)
            .ok_or_else(|| DeckError::index_out_of_range(index, self.size(), &self.name))
    }

    pub fn has_value(&self, index: usize) -> DeckResult<bool> {
        self.value_status(index).map(ValueStatus::has_value)
    }

    pub fn default_applied(&self, index: usize) -> DeckResult<bool> {
        self.value_status(index).map(ValueStatus::defaulted)
    }

    // ------------------------------------------------------------------
    // output and comparison
    // ------------------------------------------------------------------

    pub fn write(&self, out: &mut DeckOutput) {
        match &self.data {
            ItemData::Int(slots) => write_slots(slots, out),
            ItemData::Double(slots) => write_slots(slots, out),
            ItemData::String(slots) => write_slots(slots, out),
            ItemData::Uda(slots) => write_slots(slots, out),
        }
        // Item sizes of ALL items are only recoverable if every slot is written
        if self.is_all() {
            out.flush_defaults();
        }
    }

    /// `cmp_default` compares statuses; `cmp_numeric` compares doubles
    /// within tolerance, otherwise doubles are not compared
    pub fn equal(&self, other: &DeckItem, cmp_default: bool, cmp_numeric: bool) -> bool {
        if self.name != other.name || self.size() != other.size() {
            return false;
        }

        match (&self.data, &other.data) {
            (ItemData::Int(a), ItemData::Int(b)) => slots_equal(a, b, cmp_default, |x, y| x == y),
            (ItemData::Double(a), ItemData::Double(b)) => {
                slots_equal(a, b, cmp_default, |x, y| !cmp_numeric || double_equal(*x, *y))
            }
            (ItemData::String(a), ItemData::String(b)) => {
                slots_equal(a, b, cmp_default, |x, y| x == y)
            }
            (ItemData::Uda(a), ItemData::Uda(b)) => {
                slots_equal(a, b, cmp_default, |x, y| match (x.payload(), y.payload()) {
                    (UDAPayload::Numeric(p), UDAPayload::Numeric(q)) => {
                        !cmp_numeric || double_equal(*p, *q)
                    }
                    (UDAPayload::Text(p), UDAPayload::Text(q)) => p == q,
                    _ => false,
                })
            }
            _ => false,
        }
    }
}

fn empty_slot<T: ItemValue>(dimension: Dimension) -> Slot<T> {
    Slot {
        value: T::default(),
        status: ValueStatus::EmptyDefault,
        dimension,
    }
}

fn write_slots<T: ItemValue>(slots: &[Slot<T>], out: &mut DeckOutput) {
    for slot in slots {
        if slot.status.defaulted() {
            out.stash_default();
        } else {
            out.write_value(&slot.value.to_token());
        }
    }
}

fn slots_equal<T>(
    a: &[Slot<T>],
    b: &[Slot<T>],
    cmp_default: bool,
    values_equal: impl Fn(&T, &T) -> bool,
) -> bool {
    a.iter().zip(b).all(|(x, y)| {
        (!cmp_default || x.status == y.status) && values_equal(&x.value, &y.value)
    })
}

fn double_equal(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= NUMERIC_TOLERANCE || diff <= NUMERIC_TOLERANCE * a.abs().max(b.abs())
}

impl fmt::Display for DeckItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn tokens<T: ItemValue>(slots: &[Slot<T>]) -> Vec<String> {
            slots
                .iter()
                .map(|slot| match slot.status {
                    ValueStatus::EmptyDefault | ValueStatus::Uninitialized => "*".to_string(),
                    _ => slot.value.to_token(),
                })
                .collect()
        }

        let values = match &self.data {
            ItemData::Int(slots) => tokens(slots),
            ItemData::Double(slots) => tokens(slots),
            ItemData::String(slots) => tokens(slots),
            ItemData::Uda(slots) => tokens(slots),
        };
        write!(f, "{}: [{}]", self.name, values.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pressure_item() -> DeckItem {
        let bar = Dimension::scaling(1e5);
        let mut item = DeckItem::from_schema(&ParserItem::new("PRESSURE", ItemType::Double).all());
        item.push(250.0, ValueStatus::DeckValue, bar).unwrap();
        item.push(1.0, ValueStatus::ValidDefault, bar).unwrap();
        item.push_empty_default(bar);
        item
    }

    #[test]
    fn test_typed_access() {
        let item = pressure_item();
        assert_eq!(item.size(), 3);
        assert_eq!(item.get::<f64>(0), Ok(250.0));
        assert_eq!(item.get_si_double(0), Ok(250.0e5));
        assert_eq!(item.get_si_double(1), Ok(1.0e5));
        assert_matches!(item.get::<i32>(0), Err(DeckError::TypeMismatch { .. }));
        assert_matches!(item.get::<f64>(3), Err(DeckError::IndexOutOfRange { index: 3, .. }));
        assert_matches!(item.get::<f64>(2), Err(DeckError::ValueNotAvailable { index: 2, .. }));
    }

    #[test]
    fn test_status_queries() {
        let item = pressure_item();
        assert_eq!(item.has_value(0), Ok(true));
        assert_eq!(item.default_applied(0), Ok(false));
        assert_eq!(item.has_value(1), Ok(true));
        assert_eq!(item.default_applied(1), Ok(true));
        assert_eq!(item.has_value(2), Ok(false));
        assert_eq!(item.default_applied(2), Ok(true));
        assert_matches!(item.has_value(9), Err(DeckError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_push_wrong_type() {
        let mut item = DeckItem::new("WELL", ItemType::String);
        assert_matches!(
            item.push(1, ValueStatus::DeckValue, Dimension::identity()),
            Err(DeckError::TypeMismatch { expected: "INT", found: "STRING", .. })
        );
    }

    #[test]
    fn test_trimmed_string() {
        let mut item = DeckItem::new("WELL", ItemType::String);
        item.push("OP1  ".to_string(), ValueStatus::DeckValue, Dimension::identity())
            .unwrap();
        assert_eq!(item.get_trimmed_string(0), Ok("OP1".to_string()));
    }

    #[test]
    fn test_uda_resolution_keeps_dimension() {
        let rate = Dimension::scaling(1.0 / 86400.0);
        let mut item = DeckItem::new("ORAT", ItemType::Uda);
        item.push(UDAValue::from("FUOPR"), ValueStatus::DeckValue, rate)
            .unwrap();
        assert!(item.get_si_double(0).is_err());

        item.set_uda(0, UDAValue::from(86400.0)).unwrap();
        assert_eq!(item.get::<UDAValue>(0).map(|u| u.dimension()), Ok(rate));
        assert!((item.get_si_double(0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_relaxations() {
        let bar = Dimension::scaling(1e5);
        let mut explicit = DeckItem::new("P", ItemType::Double);
        explicit.push(1.0, ValueStatus::DeckValue, bar).unwrap();
        let mut defaulted = DeckItem::new("P", ItemType::Double);
        defaulted.push(1.0, ValueStatus::ValidDefault, bar).unwrap();

        assert!(!explicit.equal(&defaulted, true, true));
        assert!(explicit.equal(&defaulted, false, true));

        let mut close = DeckItem::new("P", ItemType::Double);
        close.push(1.00001, ValueStatus::DeckValue, bar).unwrap();
        let mut far = DeckItem::new("P", ItemType::Double);
        far.push(2.0, ValueStatus::DeckValue, bar).unwrap();

        assert!(explicit.equal(&close, true, true));
        assert!(!explicit.equal(&far, true, true));
        assert!(explicit.equal(&far, true, false));
    }

    #[test]
    fn test_write_flushes_trailing_defaults_of_all_items() {
        let mut out = DeckOutput::new();
        out.start_record();
        pressure_item().write(&mut out);
        out.end_record();
        assert_eq!(out.as_str(), "  250.0 2* /\n");
    }

    #[test]
    fn test_string_with_apostrophe_writes_double_quotes() {
        let mut item = DeckItem::new("WELL", ItemType::String);
        item.push("O'NEIL".to_string(), ValueStatus::DeckValue, Dimension::identity())
            .unwrap();
        let mut out = DeckOutput::new();
        out.start_record();
        item.write(&mut out);
        out.end_record();
        assert_eq!(out.as_str(), "  \"O'NEIL\" /\n");
    }

    #[test]
    fn test_display() {
        assert_eq!(pressure_item().to_string(), "PRESSURE: [250.0 1.0 *]");
    }
}
