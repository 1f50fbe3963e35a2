//! Value enum for dynamic cell values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic cell value produced by column and filter accessors.
///
/// # Ordering
///
/// [`Value::cmp_natural`] defines the order used for sorting. Values of
/// different types order by type: `Null < Bool < Int/Float < String < DateTime`.
/// `Int` and `Float` compare numerically with each other.
///
/// # Example
///
/// ```
/// use datatable_lib::Value;
///
/// let name = Value::from("error-rate");
/// let count = Value::from(42i64);
/// let empty = Value::Null;
///
/// assert_eq!(name.to_string(), "error-rate");
/// assert_eq!(empty.to_string(), "");
/// assert!(empty.cmp_natural(&count).is_lt());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
        }
    }

    /// Returns the value as a number, if it is numeric or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the value as a UTC timestamp.
    ///
    /// Strings are accepted in RFC 3339 form, or as a naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamp which is read as UTC.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Converts a JSON value into a cell value.
    ///
    /// RFC 3339 strings become [`Value::DateTime`]; arrays and objects are
    /// kept as their JSON text.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
                Err(_) => Value::String(s.clone()),
            },
            other => Value::String(other.to_string()),
        }
    }

    /// Compares two values using the natural sort order.
    pub fn cmp_natural(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => compare_f64(a, b),
                    _ => Ordering::Equal,
                }
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::DateTime(_) => 4,
        }
    }
}

/// NaN sorts after every number.
fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_cross_type_ordering() {
        let values = [
            Value::Null,
            Value::Bool(false),
            Value::Int(3),
            Value::String("a".into()),
            Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ];
        for pair in values.windows(2) {
            assert_eq!(pair[0].cmp_natural(&pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_int_and_float_compare_numerically() {
        assert_eq!(Value::Int(2).cmp_natural(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).cmp_natural(&Value::Int(3)), Ordering::Equal);
        assert_eq!(Value::Float(f64::NAN).cmp_natural(&Value::Int(1)), Ordering::Greater);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(12i64).to_string(), "12");
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Value::from(dt).to_string(), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "count": 5,
            "ratio": 0.5,
            "name": "node-1",
            "seen": "2024-03-01T12:00:00Z",
            "tags": ["a"],
        });
        assert_eq!(Value::from_json(&json["count"]), Value::Int(5));
        assert_eq!(Value::from_json(&json["ratio"]), Value::Float(0.5));
        assert_eq!(Value::from_json(&json["name"]), Value::from("node-1"));
        assert_eq!(
            Value::from_json(&json["seen"]),
            Value::DateTime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(Value::from_json(&json["tags"]), Value::from("[\"a\"]"));
        assert_eq!(Value::from_json(&json["missing"]), Value::Null);
    }

    #[test]
    fn test_as_datetime_accepts_naive_strings() {
        let value = Value::from("2024-01-01T08:30:00");
        assert_eq!(
            value.as_datetime(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap())
        );
        assert_eq!(Value::from("not a date").as_datetime(), None);
    }
}
