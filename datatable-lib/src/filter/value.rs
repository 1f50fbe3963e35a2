//! Filter kinds and filter values.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use super::transform::end_of_day;
use super::transform::start_of_day;
use crate::model::Value;

/// The kind of a filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Free-text, case-insensitive substring match.
    Text,
    /// Pick one option from a fixed or loaded set.
    SingleChoice,
    /// Pick any number of options.
    MultiChoice,
    /// Pick one option from a searchable, usually loaded, set.
    SearchableSingleChoice,
    /// Numeric range with optional bounds.
    Range,
    /// Date range with optional bounds.
    DateRange,
}

impl FilterKind {
    /// Returns the name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::SingleChoice => "single_choice",
            FilterKind::MultiChoice => "multi_choice",
            FilterKind::SearchableSingleChoice => "searchable_single_choice",
            FilterKind::Range => "range",
            FilterKind::DateRange => "date_range",
        }
    }

    /// Returns `true` for kinds that pick from an option set.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FilterKind::SingleChoice | FilterKind::MultiChoice | FilterKind::SearchableSingleChoice
        )
    }
}

/// A picked filter value.
///
/// Each variant carries the payload for the kinds it serves:
///
/// | Variant | Kinds |
/// |---------|-------|
/// | `Text` | `Text` |
/// | `Choice` | `SingleChoice`, `SearchableSingleChoice` |
/// | `Choices` | `MultiChoice` |
/// | `Range` | `Range` |
/// | `DateRange` | `DateRange` |
///
/// An empty value (blank text, no choice, empty selection, no bounds) means
/// the filter is inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Free-text needle.
    Text(String),
    /// Single picked option value.
    Choice(Option<String>),
    /// Set of picked option values.
    Choices(Vec<String>),
    /// Inclusive numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Inclusive date bounds; only the date part takes part in matching.
    DateRange {
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    },
}

impl FilterValue {
    /// Creates a text value.
    pub fn text(needle: impl Into<String>) -> Self {
        FilterValue::Text(needle.into())
    }

    /// Creates a single choice value.
    pub fn choice(value: impl Into<String>) -> Self {
        FilterValue::Choice(Some(value.into()))
    }

    /// Creates a multi choice value.
    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Creates a numeric range value.
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range { min, max }
    }

    /// Creates a date range value.
    pub fn date_range(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        FilterValue::DateRange { start, end }
    }

    /// Returns the blank value for a filter kind.
    pub fn empty_for(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Text => FilterValue::Text(String::new()),
            FilterKind::SingleChoice | FilterKind::SearchableSingleChoice => FilterValue::Choice(None),
            FilterKind::MultiChoice => FilterValue::Choices(Vec::new()),
            FilterKind::Range => FilterValue::Range { min: None, max: None },
            FilterKind::DateRange => FilterValue::DateRange { start: None, end: None },
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Choice(_) => "choice",
            FilterValue::Choices(_) => "choices",
            FilterValue::Range { .. } => "range",
            FilterValue::DateRange { .. } => "date_range",
        }
    }

    /// Returns `true` if this value can be used with the given kind.
    pub fn accepts(&self, kind: FilterKind) -> bool {
        matches!(
            (self, kind),
            (FilterValue::Text(_), FilterKind::Text)
                | (FilterValue::Choice(_), FilterKind::SingleChoice)
                | (FilterValue::Choice(_), FilterKind::SearchableSingleChoice)
                | (FilterValue::Choices(_), FilterKind::MultiChoice)
                | (FilterValue::Range { .. }, FilterKind::Range)
                | (FilterValue::DateRange { .. }, FilterKind::DateRange)
        )
    }

    /// Returns `true` if this value leaves the filter inactive.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(needle) => needle.is_empty(),
            FilterValue::Choice(choice) => choice.as_deref().is_none_or(str::is_empty),
            FilterValue::Choices(choices) => choices.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::DateRange { start, end } => start.is_none() && end.is_none(),
        }
    }

    /// Tests a cell value against this filter value.
    ///
    /// Empty filter values match everything.
    pub fn matches(&self, value: &Value) -> bool {
        if self.is_empty() {
            return true;
        }
        match self {
            FilterValue::Text(needle) => value
                .to_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            FilterValue::Choice(choice) => choice.as_deref() == Some(value.to_string().as_str()),
            FilterValue::Choices(choices) => {
                let text = value.to_string();
                choices.iter().any(|c| *c == text)
            }
            FilterValue::Range { min, max } => value.as_f64().is_some_and(|n| {
                min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
            }),
            FilterValue::DateRange { start, end } => value.as_datetime().is_some_and(|dt| {
                start.is_none_or(|s| dt >= start_of_day(s)) && end.is_none_or(|e| dt <= end_of_day(e))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_values() {
        assert!(FilterValue::text("").is_empty());
        assert!(FilterValue::Choice(None).is_empty());
        assert!(FilterValue::choice("").is_empty());
        assert!(FilterValue::choices(Vec::<String>::new()).is_empty());
        assert!(FilterValue::range(None, None).is_empty());
        assert!(FilterValue::date_range(None, None).is_empty());
        assert!(!FilterValue::range(Some(1.0), None).is_empty());
    }

    #[test]
    fn test_empty_for_accepts_own_kind() {
        for kind in [
            FilterKind::Text,
            FilterKind::SingleChoice,
            FilterKind::MultiChoice,
            FilterKind::SearchableSingleChoice,
            FilterKind::Range,
            FilterKind::DateRange,
        ] {
            let value = FilterValue::empty_for(kind);
            assert!(value.accepts(kind), "{}", kind.name());
            assert!(value.is_empty());
        }
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let filter = FilterValue::text("ERR");
        assert!(filter.matches(&Value::from("error-rate")));
        assert!(!filter.matches(&Value::from("latency")));
    }

    #[test]
    fn test_choice_is_exact() {
        let filter = FilterValue::choice("critical");
        assert!(filter.matches(&Value::from("critical")));
        assert!(!filter.matches(&Value::from("Critical")));
        assert!(!filter.matches(&Value::from("critical-ish")));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let filter = FilterValue::range(Some(10.0), Some(20.0));
        assert!(filter.matches(&Value::Int(10)));
        assert!(filter.matches(&Value::Float(20.0)));
        assert!(!filter.matches(&Value::Int(21)));
        assert!(!filter.matches(&Value::from("n/a")));
        assert!(FilterValue::range(None, Some(5.0)).matches(&Value::Int(-3)));
    }

    #[test]
    fn test_date_range_covers_whole_days() {
        let filter = FilterValue::date_range(Some(at(2024, 1, 1, 9, 0)), Some(at(2024, 1, 2, 0, 0)));
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        assert!(filter.matches(&Value::from(early)));
        assert!(filter.matches(&Value::from(late)));
        assert!(!filter.matches(&Value::from(after)));
        assert!(!filter.matches(&Value::Null));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&FilterValue::choices(["critical"])).unwrap();
        assert_eq!(json, r#"{"kind":"choices","value":["critical"]}"#);
        let back: FilterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FilterValue::choices(["critical"]));
    }
}
