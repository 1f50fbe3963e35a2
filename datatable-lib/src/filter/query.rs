//! Query parameters produced from applied filters.

use std::collections::BTreeMap;

use serde::Serialize;

/// Flat, multi-valued query parameters keyed by filter field.
///
/// Fields are kept in name order, which is also the order of
/// [`to_query_string`](Self::to_query_string).
///
/// Produced when filters are applied in server-delegated mode and handed to
/// the `on_filter_change` callback.
///
/// # Example
///
/// ```
/// use datatable_lib::filter::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.insert("severity", vec!["critical".to_string(), "warning".to_string()]);
///
/// assert_eq!(params.to_query_string(), "severity=critical&severity=warning");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the values for a field, replacing any previous values.
    pub fn insert(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.params.insert(field.into(), values);
    }

    /// Returns the values for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.params.get(field).map(Vec::as_slice)
    }

    /// Iterates over fields and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encodes the parameters as `application/x-www-form-urlencoded`.
    ///
    /// Multi-valued fields repeat the key once per value.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (field, values) in &self.params {
            for value in values {
                serializer.append_pair(field, value);
            }
        }
        serializer.finish()
    }
}
