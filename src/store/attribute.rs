//! Store-native attribute values and their mapping to and from JSON.

use crate::store::CodecError;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// A single typed attribute of a stored [`Item`](crate::store::Item).
///
/// Numbers are kept as their decimal string, the way key-value stores with a
/// typed attribute model usually carry them on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    S(String),
    N(String),
    Bool(bool),
    Null,
    L(Vec<AttributeValue>),
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns the string payload if this is an `S` attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::Number(n) => AttributeValue::N(n.to_string()),
            Value::String(s) => AttributeValue::S(s),
            Value::Array(values) => {
                AttributeValue::L(values.into_iter().map(AttributeValue::from_json).collect())
            }
            Value::Object(map) => AttributeValue::M(
                map.into_iter()
                    .map(|(k, v)| (k, AttributeValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts back to JSON. Fails only for an `N` that is not a number.
    pub fn into_json(self) -> Result<Value, CodecError> {
        Ok(match self {
            AttributeValue::Null => Value::Null,
            AttributeValue::Bool(b) => Value::Bool(b),
            AttributeValue::S(s) => Value::String(s),
            AttributeValue::N(n) => {
                let number: Number = serde_json::from_str(&n)
                    .map_err(|_| CodecError::InvalidNumber(n.clone()))?;
                Value::Number(number)
            }
            AttributeValue::L(values) => Value::Array(
                values
                    .into_iter()
                    .map(AttributeValue::into_json)
                    .collect::<Result<_, _>>()?,
            ),
            AttributeValue::M(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| v.into_json().map(|v| (k, v)))
                    .collect::<Result<Map<_, _>, _>>()?,
            ),
        })
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::S(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::S(s)
    }
}
