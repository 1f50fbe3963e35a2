//! Option loader over the distinct values of a field.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use datatable_lib::OptionLoadError;
use datatable_lib::filter::FilterOption;
use datatable_lib::filter::OptionLoader;

use crate::row::JsonRow;

/// Loads the distinct non-null values of a field, sorted, after an
/// optional delay standing in for a remote lookup.
#[derive(Debug, Clone)]
pub struct DistinctLoader {
    values: Vec<String>,
    delay: Duration,
}

impl DistinctLoader {
    pub fn new(rows: &[JsonRow], field: &str, delay: Duration) -> Self {
        let values: BTreeSet<String> = rows
            .iter()
            .map(|row| row.field(field))
            .filter(|value| !value.is_null())
            .map(|value| value.to_string())
            .collect();
        Self {
            values: values.into_iter().collect(),
            delay,
        }
    }
}

#[async_trait]
impl OptionLoader for DistinctLoader {
    async fn load(&self) -> Result<Vec<FilterOption>, OptionLoadError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.values.iter().cloned().map(FilterOption::from_value).collect())
    }
}
