//! Rows read from JSON objects.

use datatable_lib::TableRow;
use datatable_lib::Value;
use serde_json::Map;

/// A row backed by a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRow {
    key: String,
    fields: Map<String, serde_json::Value>,
}

impl JsonRow {
    /// Creates a row keyed by `id_field`, falling back to `index` when the
    /// object has no such field.
    pub fn new(fields: Map<String, serde_json::Value>, id_field: &str, index: usize) -> Self {
        let key = match fields.get(id_field).map(Value::from_json) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => index.to_string(),
        };
        Self { key, fields }
    }

    /// Reads a field; missing fields are null.
    pub fn field(&self, name: &str) -> Value {
        self.fields.get(name).map(Value::from_json).unwrap_or(Value::Null)
    }
}

impl TableRow for JsonRow {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }
}
