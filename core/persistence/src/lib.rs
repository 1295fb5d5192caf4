//! FILENAME: core/persistence/src/lib.rs
//! Dataset Ingestion Module
//!
//! Decodes the raw event dataset (a JSON array of record objects) into an
//! immutable `Dataset`. Decoding is all-or-nothing: a payload that is not an
//! array, or any element that is not a record object, rejects the whole
//! load. Per-field leniency (empty strings, numeric strings) is handled by
//! the record schema itself.

mod error;

pub use error::LoadError;

use engine::{Dataset, Record};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses a JSON payload into a dataset.
pub fn parse_dataset(json: &str) -> Result<Dataset, LoadError> {
    let payload: Value = serde_json::from_str(json)?;
    let elements = match payload {
        Value::Array(elements) => elements,
        other => return Err(LoadError::NotASequence(kind_of(&other).to_string())),
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            let source = <serde_json::Error as serde::de::Error>::custom(format!(
                "expected a record object, found {}",
                kind_of(&element)
            ));
            return Err(LoadError::InvalidRecord { index, source });
        }
        let record: Record = serde_json::from_value(element)
            .map_err(|source| LoadError::InvalidRecord { index, source })?;
        records.push(record);
    }

    Ok(Dataset::new(records))
}

/// Reads and parses a dataset file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_dataset(&json)
}
