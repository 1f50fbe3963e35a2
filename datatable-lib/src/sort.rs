//! Multi-column sort descriptor.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns `"asc"` or `"desc"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Orients an ascending comparison result for this direction.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// One entry of a sort descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Column key.
    pub column: String,
    /// Sort direction.
    pub direction: Direction,
}

/// Ordered list of sort keys; later keys break ties left by earlier ones.
///
/// Toggling a column cycles ascending → descending → removed. Toggling a
/// column that is not yet sorted appends it as the lowest-priority key.
///
/// # Example
///
/// ```
/// use datatable_lib::{Direction, SortDescriptor};
///
/// let mut sort = SortDescriptor::new();
/// assert_eq!(sort.toggle("severity"), Some(Direction::Asc));
/// assert_eq!(sort.toggle("name"), Some(Direction::Asc));
/// assert_eq!(sort.toggle("severity"), Some(Direction::Desc));
/// assert_eq!(sort.toggle("severity"), None);
///
/// assert_eq!(sort.len(), 1);
/// assert_eq!(sort.direction_of("name"), Some((Direction::Asc, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortDescriptor {
    keys: Vec<SortKey>,
}

impl SortDescriptor {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the sort cycle of a column and returns its new direction.
    ///
    /// Returns `None` once the column has been removed.
    pub fn toggle(&mut self, column: &str) -> Option<Direction> {
        match self.keys.iter().position(|k| k.column == column) {
            Some(i) => match self.keys[i].direction {
                Direction::Asc => {
                    self.keys[i].direction = Direction::Desc;
                    Some(Direction::Desc)
                }
                Direction::Desc => {
                    self.keys.remove(i);
                    None
                }
            },
            None => {
                self.keys.push(SortKey {
                    column: column.to_string(),
                    direction: Direction::Asc,
                });
                Some(Direction::Asc)
            }
        }
    }

    /// Returns the direction and priority (0 = primary) of a column.
    pub fn direction_of(&self, column: &str) -> Option<(Direction, usize)> {
        self.keys
            .iter()
            .position(|k| k.column == column)
            .map(|i| (self.keys[i].direction, i))
    }

    pub(crate) fn push(&mut self, key: SortKey) {
        self.keys.push(key);
    }

    /// Returns the sort keys in priority order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compares two rows' sort values, one value per key in priority order.
    ///
    /// The first key whose values differ decides; if all tie the rows are
    /// equal, which a stable sort turns into "keep original order".
    pub fn compare(&self, a: &[Value], b: &[Value]) -> Ordering {
        self.keys
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(key, (a, b))| key.direction.apply(a.cmp_natural(b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let mut sort = SortDescriptor::new();
        assert_eq!(sort.toggle("name"), Some(Direction::Asc));
        assert_eq!(sort.toggle("name"), Some(Direction::Desc));
        assert_eq!(sort.toggle("name"), None);
        assert!(sort.is_empty());
    }

    #[test]
    fn test_new_column_is_appended() {
        let mut sort = SortDescriptor::new();
        sort.toggle("severity");
        sort.toggle("name");
        let columns: Vec<&str> = sort.keys().iter().map(|k| k.column.as_str()).collect();
        assert_eq!(columns, vec!["severity", "name"]);
    }

    #[test]
    fn test_compare_uses_later_keys_for_ties() {
        let mut sort = SortDescriptor::new();
        sort.toggle("severity");
        sort.toggle("count");
        sort.toggle("count");

        let a = [Value::from("critical"), Value::Int(1)];
        let b = [Value::from("critical"), Value::Int(5)];
        let c = [Value::from("info"), Value::Int(9)];

        assert_eq!(sort.compare(&a, &b), Ordering::Greater);
        assert_eq!(sort.compare(&b, &c), Ordering::Less);
        assert_eq!(sort.compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_serde_shape() {
        let mut sort = SortDescriptor::new();
        sort.toggle("name");
        assert_eq!(
            serde_json::to_string(&sort).unwrap(),
            r#"[{"column":"name","direction":"asc"}]"#
        );
    }
}
