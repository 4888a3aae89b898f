use std::fmt;

use aws_smithy_types::base64;
use serde_json::{Map, Number, Value as Json};

use crate::error::Error;
use crate::value::{AttributeMap, Value};

#[derive(Debug, PartialEq, Eq)]
pub enum JsonConversionError {
    InvalidNumber { value: String },
    InvalidStructure { message: String },
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for JsonConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonConversionError::InvalidNumber { value } => {
                write!(f, "number cannot be represented in JSON: {value}")
            }
            JsonConversionError::InvalidStructure { message } => {
                write!(f, "invalid JSON structure: {message}")
            }
            JsonConversionError::SerializationError(inner) => {
                write!(f, "failed to serialize JSON value: {inner}")
            }
            JsonConversionError::DeserializationError(inner) => {
                write!(f, "failed to parse JSON value: {inner}")
            }
        }
    }
}

impl std::error::Error for JsonConversionError {}

/// Checks that `text` is well-formed JSON.
///
/// Malformed input comes back verbatim in [`Error::InvalidJson`].
pub fn is_json(text: &str) -> Result<bool, Error> {
    match serde_json::from_str::<Json>(text) {
        Ok(_) => Ok(true),
        Err(_) => Err(Error::InvalidJson(text.to_string())),
    }
}

pub fn to_json(map: &AttributeMap) -> Result<Json, JsonConversionError> {
    let mut json_map = Map::with_capacity(map.len());
    for (key, value) in map.iter() {
        json_map.insert(key.to_string(), to_json_value(value)?);
    }
    Ok(Json::Object(json_map))
}

pub fn to_json_string(map: &AttributeMap) -> Result<String, JsonConversionError> {
    let json_value = to_json(map)?;
    serde_json::to_string_pretty(&json_value)
        .map_err(|err| JsonConversionError::SerializationError(err.to_string()))
}

pub fn from_json_string(input: &str) -> Result<AttributeMap, JsonConversionError> {
    let value: Json = serde_json::from_str(input)
        .map_err(|err| JsonConversionError::DeserializationError(err.to_string()))?;
    from_json(&value)
}

pub fn from_json(value: &Json) -> Result<AttributeMap, JsonConversionError> {
    let Json::Object(map) = value else {
        return Err(JsonConversionError::InvalidStructure {
            message: "expected a JSON object at the top level".to_string(),
        });
    };
    object_to_map(map)
}

fn object_to_map(map: &Map<String, Json>) -> Result<AttributeMap, JsonConversionError> {
    let mut result = AttributeMap::new();
    for (key, value) in map {
        result.insert(key.clone(), from_json_value(value)?);
    }
    Ok(result)
}

fn from_json_value(value: &Json) -> Result<Value, JsonConversionError> {
    match value {
        Json::String(text) => Ok(Value::String(text.clone())),
        Json::Number(number) => {
            let text = number.to_string();
            Value::number(&text).map_err(|_| JsonConversionError::InvalidNumber { value: text })
        }
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Null => Ok(Value::Null),
        Json::Array(values) => {
            let mut list = Vec::with_capacity(values.len());
            for value in values {
                list.push(from_json_value(value)?);
            }
            Ok(Value::List(list))
        }
        Json::Object(map) => object_to_map(map).map(Value::Map),
    }
}

fn to_json_value(value: &Value) -> Result<Json, JsonConversionError> {
    match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::String(s) => Ok(Json::String(s.clone())),
        Value::Number(n) => n
            .parse::<Number>()
            .map(Json::Number)
            .map_err(|_| JsonConversionError::InvalidNumber { value: n.clone() }),
        Value::Binary(bytes) => Ok(Json::String(base64::encode(bytes))),
        Value::List(values) => {
            let mut array = Vec::with_capacity(values.len());
            for value in values {
                array.push(to_json_value(value)?);
            }
            Ok(Json::Array(array))
        }
        Value::Map(map) | Value::Record(map) => to_json(map),
    }
}
