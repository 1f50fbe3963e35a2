//! Value transforms for server-delegated filtering.
//!
//! A transform turns a picked filter value into the list of strings submitted
//! under the filter's field name. Range values use the `gte:`/`lte:` prefix
//! convention understood by the backend as comparison operators:
//!
//! ```text
//! created_at = ["gte:2024-01-01T00:00:00.000Z", "lte:2024-01-02T23:59:59.999Z"]
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;

use super::value::FilterValue;

/// Custom transform function.
pub type TransformFn = Arc<dyn Fn(&FilterValue) -> Vec<String> + Send + Sync>;

/// Turns a picked filter value into query parameter values.
#[derive(Clone)]
pub enum ValueTransform {
    /// Date range expanded to whole days: `gte:` start of the first day,
    /// `lte:` last millisecond of the last day.
    WholeDayRange,
    /// `gte:`/`lte:` pair with the bounds exactly as picked.
    ExactRange,
    /// Caller-supplied transform.
    Custom(TransformFn),
}

impl ValueTransform {
    /// Creates a custom transform.
    pub fn custom(f: impl Fn(&FilterValue) -> Vec<String> + Send + Sync + 'static) -> Self {
        ValueTransform::Custom(Arc::new(f))
    }

    /// Applies the transform to a value.
    ///
    /// Values the transform does not understand fall back to their raw
    /// encoding.
    pub fn apply(&self, value: &FilterValue) -> Vec<String> {
        match (self, value) {
            (ValueTransform::WholeDayRange, FilterValue::DateRange { start, end }) => bounds(
                start.map(|s| format_timestamp(start_of_day(s))),
                end.map(|e| format_timestamp(end_of_day(e))),
            ),
            (ValueTransform::Custom(f), value) => f(value),
            (_, value) => raw_params(value),
        }
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTransform::WholeDayRange => write!(f, "WholeDayRange"),
            ValueTransform::ExactRange => write!(f, "ExactRange"),
            ValueTransform::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Encodes a value without a transform.
///
/// Text and choices pass through as-is; ranges use the exact `gte:`/`lte:`
/// encoding.
pub(crate) fn raw_params(value: &FilterValue) -> Vec<String> {
    match value {
        FilterValue::Text(needle) => vec![needle.clone()],
        FilterValue::Choice(choice) => choice.iter().cloned().collect(),
        FilterValue::Choices(choices) => choices.clone(),
        FilterValue::Range { min, max } => bounds(min.map(|m| m.to_string()), max.map(|m| m.to_string())),
        FilterValue::DateRange { start, end } => bounds(
            start.map(|s| format_timestamp(s.and_utc())),
            end.map(|e| format_timestamp(e.and_utc())),
        ),
    }
}

fn bounds(gte: Option<String>, lte: Option<String>) -> Vec<String> {
    gte.map(|v| format!("gte:{}", v))
        .into_iter()
        .chain(lte.map(|v| format!("lte:{}", v)))
        .collect()
}

/// Midnight at the start of the given timestamp's day, read as UTC.
pub fn start_of_day(at: NaiveDateTime) -> DateTime<Utc> {
    at.date().and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of the given timestamp's day, read as UTC.
pub fn end_of_day(at: NaiveDateTime) -> DateTime<Utc> {
    at.date().and_hms_milli_opt(23, 59, 59, 999).unwrap_or(at).and_utc()
}

/// Formats a timestamp as ISO 8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_whole_day_range() {
        let value = FilterValue::date_range(Some(at(2024, 1, 1, 0, 0)), Some(at(2024, 1, 2, 23, 59)));
        assert_eq!(
            ValueTransform::WholeDayRange.apply(&value),
            vec!["gte:2024-01-01T00:00:00.000Z", "lte:2024-01-02T23:59:59.999Z"]
        );
    }

    #[test]
    fn test_whole_day_range_open_end() {
        let value = FilterValue::date_range(Some(at(2024, 2, 29, 15, 30)), None);
        assert_eq!(
            ValueTransform::WholeDayRange.apply(&value),
            vec!["gte:2024-02-29T00:00:00.000Z"]
        );
    }

    #[test]
    fn test_end_of_last_representable_day() {
        let end = end_of_day(NaiveDateTime::MAX);
        assert_eq!(end.date_naive(), NaiveDateTime::MAX.date());
        assert!(end.naive_utc() <= NaiveDateTime::MAX);

        let value = FilterValue::date_range(None, Some(NaiveDateTime::MAX));
        let params = ValueTransform::WholeDayRange.apply(&value);
        assert_eq!(params.len(), 1);
        assert!(params[0].starts_with("lte:+262143-12-31T23:59:59.999"));
    }

    #[test]
    fn test_exact_range() {
        let value = FilterValue::date_range(Some(at(2024, 1, 1, 8, 15)), Some(at(2024, 1, 1, 9, 45)));
        assert_eq!(
            ValueTransform::ExactRange.apply(&value),
            vec!["gte:2024-01-01T08:15:00.000Z", "lte:2024-01-01T09:45:00.000Z"]
        );
        assert_eq!(
            ValueTransform::ExactRange.apply(&FilterValue::range(Some(0.5), Some(90.0))),
            vec!["gte:0.5", "lte:90"]
        );
    }

    #[test]
    fn test_custom_transform() {
        let upper = ValueTransform::custom(|v| match v {
            FilterValue::Text(t) => vec![t.to_uppercase()],
            _ => Vec::new(),
        });
        assert_eq!(upper.apply(&FilterValue::text("red")), vec!["RED"]);
    }

    #[test]
    fn test_raw_params() {
        assert_eq!(raw_params(&FilterValue::text("node")), vec!["node"]);
        assert_eq!(raw_params(&FilterValue::choice("green")), vec!["green"]);
        assert_eq!(
            raw_params(&FilterValue::choices(["critical", "warning"])),
            vec!["critical", "warning"]
        );
        assert_eq!(raw_params(&FilterValue::range(None, Some(3.0))), vec!["lte:3"]);
    }
}
