use std::collections::BTreeMap;
use std::iter::FromIterator;

use nrz_core::NrzError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes: object keys sorted at every
/// depth, no insignificant whitespace.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, NrzError> {
    let value = serde_json::to_value(value).map_err(|err| NrzError::serde("json-serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical)
        .map_err(|err| NrzError::serde("json-write", err))?;
    Ok(bytes)
}

/// Canonical JSON as text.
pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, NrzError> {
    let bytes = to_canonical_json_bytes(value)?;
    String::from_utf8(bytes).map_err(|err| NrzError::serde("json-utf8", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, NrzError> {
    serde_json::from_slice(data).map_err(|err| NrzError::serde("json-deserialize", err))
}
