//! Application records and their mapping to storage items.
//!
//! A record declares its fields explicitly through [`Record::fields`]; the
//! mapper never inspects a value beyond that table. Records are allocated
//! blank by a caller-supplied constructor and then hydrated from an item.

pub mod mapper;

pub use mapper::*;

use crate::value::{AttributeMap, Value};

pub const PARTITION_KEY: &str = "PK";
pub const SORT_KEY: &str = "SK";

pub trait Record: Send {
    fn partition_key(&self) -> &str;

    fn sort_key(&self) -> &str;

    /// Declared fields in declaration order, paired with their current
    /// value (`None` while unset).
    fn fields(&self) -> Vec<(&str, Option<Value>)>;

    /// Populates a declared field. Names the record does not declare are
    /// ignored.
    fn set_field(&mut self, name: &str, value: Value);
}

/// Global counter row shared by the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    current_value: Option<i64>,
}

impl Sequence {
    pub const PK: &'static str = "GLOBAL";
    pub const SK: &'static str = "SEQUENCE";

    pub fn new() -> Self {
        Self {
            current_value: None,
        }
    }

    pub fn with_value(current_value: i64) -> Self {
        Self {
            current_value: Some(current_value),
        }
    }

    pub fn init(&mut self) {
        self.current_value = Some(0);
    }

    pub fn current_value(&self) -> Option<i64> {
        self.current_value
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for Sequence {
    fn partition_key(&self) -> &str {
        Self::PK
    }

    fn sort_key(&self) -> &str {
        Self::SK
    }

    fn fields(&self) -> Vec<(&str, Option<Value>)> {
        vec![
            (PARTITION_KEY, Some(Value::from(Self::PK))),
            (SORT_KEY, Some(Value::from(Self::SK))),
            ("currentValue", self.current_value.map(Value::from)),
        ]
    }

    fn set_field(&mut self, name: &str, value: Value) {
        // The key of the sequence row is fixed.
        if name == "currentValue" {
            self.current_value = value.as_i64();
        }
    }
}

/// Record with a field table chosen at construction.
///
/// Useful when the shape of an item is only known at runtime, e.g. from
/// command-line arguments. The key fields are always declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    field_names: Vec<String>,
    attributes: AttributeMap,
}

impl Document {
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = vec![PARTITION_KEY.to_string(), SORT_KEY.to_string()];
        for name in field_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self {
            field_names: names,
            attributes: AttributeMap::new(),
        }
    }

    /// Declares every key of `attributes` and takes its values.
    pub fn from_attributes(attributes: AttributeMap) -> Self {
        let mut document = Self::new(attributes.keys().map(str::to_string).collect::<Vec<_>>());
        for (name, value) in attributes {
            document.set_field(&name, value);
        }
        document
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

impl Record for Document {
    fn partition_key(&self) -> &str {
        self.get(PARTITION_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn sort_key(&self) -> &str {
        self.get(SORT_KEY).and_then(Value::as_str).unwrap_or_default()
    }

    fn fields(&self) -> Vec<(&str, Option<Value>)> {
        self.field_names
            .iter()
            .map(|name| (name.as_str(), self.attributes.get(name).cloned()))
            .collect()
    }

    /// Key fields are written once, while the document is hydrated; later
    /// writes to `PK` or `SK` are ignored.
    fn set_field(&mut self, name: &str, value: Value) {
        let is_key = name == PARTITION_KEY || name == SORT_KEY;
        if is_key && self.attributes.contains_key(name) {
            return;
        }
        if self.field_names.iter().any(|declared| declared == name) {
            self.attributes.insert(name, value);
        }
    }
}
