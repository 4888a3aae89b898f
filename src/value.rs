use std::{collections::HashMap, fmt};

use aws_sdk_dynamodb::types::AttributeValue;
use aws_smithy_types::Blob;

/// A single attribute value carried by a record or a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Decimal text exactly as DynamoDB carries it, so values beyond `f64`
    /// precision survive a read-then-write.
    Number(String),
    String(String),
    Binary(Vec<u8>),
    /// Array-typed attribute.
    List(Vec<Value>),
    /// Nested mapping.
    Map(AttributeMap),
    /// Nested record, already flattened into its mapping.
    Record(AttributeMap),
}

impl Value {
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// True for values that describe structure rather than a plain attribute:
    /// arrays, nested mappings and nested records.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_) | Value::Record(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Builds a number from decimal text, rejecting anything DynamoDB would.
    pub fn number(raw: &str) -> Result<Self, ConversionError> {
        parse_number(raw).map(Value::Number)
    }

    pub fn as_number(&self) -> Option<&str> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(|n| n.parse().ok())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.parse().ok())
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(number_to_string(value))
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Number(value.to_string())
            }
        })*
    };
}

number_from!(i32, i64, i128, u32, u64, u128, usize);

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<AttributeMap> for Value {
    fn from(value: AttributeMap) -> Self {
        Value::Map(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::List(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) | Value::Record(map) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Field name to value mapping that keeps insertion order.
///
/// Used both as the wire-facing representation of a record and as the
/// generic container handed to write operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: Vec<(String, Value)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts into the item shape the DynamoDB client expects.
    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), to_attribute_value(value)))
            .collect()
    }

    /// Builds a mapping from a wire item. Keys are sorted so the result is
    /// deterministic; the wire format itself carries no order.
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Self, ConversionError> {
        let mut keys: Vec<&String> = item.keys().collect();
        keys.sort();
        let mut map = AttributeMap::new();
        for key in keys {
            map.insert(key.clone(), from_attribute_value(&item[key])?);
        }
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    InvalidNumber { value: String },
    UnsupportedType { attribute_type: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidNumber { value } => {
                write!(f, "invalid DynamoDB number: {value}")
            }
            ConversionError::UnsupportedType { attribute_type } => {
                write!(f, "unsupported DynamoDB attribute type: {attribute_type}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.clone()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Binary(bytes) => AttributeValue::B(Blob::new(bytes.clone())),
        Value::List(values) => AttributeValue::L(values.iter().map(to_attribute_value).collect()),
        Value::Map(map) | Value::Record(map) => AttributeValue::M(map.to_item()),
    }
}

pub fn from_attribute_value(value: &AttributeValue) -> Result<Value, ConversionError> {
    match value {
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::N(number) => parse_number(number).map(Value::Number),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(list) => {
            let mut values = Vec::with_capacity(list.len());
            for element in list {
                values.push(from_attribute_value(element)?);
            }
            Ok(Value::List(values))
        }
        AttributeValue::M(map) => AttributeMap::from_item(map).map(Value::Map),
        AttributeValue::Ss(set) => Ok(Value::List(
            set.iter().map(|s| Value::String(s.clone())).collect(),
        )),
        AttributeValue::Ns(set) => {
            let mut values = Vec::with_capacity(set.len());
            for number in set {
                values.push(Value::Number(parse_number(number)?));
            }
            Ok(Value::List(values))
        }
        AttributeValue::B(blob) => Ok(Value::Binary(blob.as_ref().to_vec())),
        AttributeValue::Bs(set) => Ok(Value::List(
            set.iter()
                .map(|blob| Value::Binary(blob.as_ref().to_vec()))
                .collect(),
        )),
        _ => Err(ConversionError::UnsupportedType {
            attribute_type: "Unknown".to_string(),
        }),
    }
}

fn parse_number(raw: &str) -> Result<String, ConversionError> {
    let text = raw.trim();
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(text.to_string()),
        _ => Err(ConversionError::InvalidNumber {
            value: raw.to_string(),
        }),
    }
}

fn number_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
