//! Filter value store.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::value::FilterValue;

/// Mapping from filter field to its current value.
///
/// A table holds two stores: the applied values that drive the visible rows,
/// and the draft values edited inside an open filter popover. A missing
/// entry and an empty value both mean "inactive".
///
/// # Example
///
/// ```
/// use datatable_lib::filter::{FilterValue, FilterValues};
///
/// let values = FilterValues::new()
///     .with("name", FilterValue::text("err"))
///     .with("severity", FilterValue::choices(["critical"]));
///
/// assert_eq!(values.active().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValues {
    values: BTreeMap<String, FilterValue>,
}

impl FilterValues {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.set(field, value);
        self
    }

    /// Sets the value of a field.
    pub fn set(&mut self, field: impl Into<String>, value: FilterValue) {
        self.values.insert(field.into(), value);
    }

    /// Returns the value of a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.values.get(field)
    }

    /// Removes the value of a field.
    pub fn remove(&mut self, field: &str) -> Option<FilterValue> {
        self.values.remove(field)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterates over all stored values, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over values that constrain rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    /// Returns `true` if no value constrains rows.
    pub fn is_inactive(&self) -> bool {
        self.active().next().is_none()
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for FilterValues {
    fn from_iter<I: IntoIterator<Item = (K, FilterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_skips_empty_values() {
        let values = FilterValues::new()
            .with("name", FilterValue::text(""))
            .with("severity", FilterValue::choices(["warning"]));

        let active: Vec<&str> = values.active().map(|(f, _)| f).collect();
        assert_eq!(active, vec!["severity"]);
        assert!(!values.is_inactive());
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut values: FilterValues = [("name", FilterValue::text("x"))].into_iter().collect();
        values.clear();
        assert!(values.is_empty());
        assert!(values.is_inactive());
    }
}
