//! Marshalling between serde records and store [`Item`]s.
//!
//! Records pass through [`serde_json::Value`] on the way in and out, so any
//! `Serialize`/`Deserialize` type whose JSON form is an object can be stored.

use crate::store::{AttributeValue, Item};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Errors raised while converting records to or from items.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("record does not encode to an object, got {0}")]
    NotAnObject(&'static str),
    #[error("attribute is not a valid number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Encodes a record into its stored representation.
pub fn marshal_item<T: Serialize>(record: &T) -> Result<Item, CodecError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, AttributeValue::from_json(v)))
            .collect()),
        other => Err(CodecError::NotAnObject(json_kind(&other))),
    }
}

/// Decodes a stored item. An empty item decodes like `{}`.
pub fn unmarshal_item<T: DeserializeOwned>(item: Item) -> Result<T, CodecError> {
    let object = item
        .into_iter()
        .map(|(k, v)| v.into_json().map(|v| (k, v)))
        .collect::<Result<Map<_, _>, _>>()?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

/// Decodes every item, failing on the first one that does not decode.
pub fn unmarshal_items<T: DeserializeOwned>(items: Vec<Item>) -> Result<Vec<T>, CodecError> {
    items.into_iter().map(unmarshal_item).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
