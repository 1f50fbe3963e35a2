//! Local-mode row pipeline: filter, then sort, then paginate.
//!
//! Each stage works on row indices and is a pure function of the previous
//! stage's output.

use std::ops::Range;

use crate::column::Column;
use crate::filter::FilterDescriptor;
use crate::filter::FilterValues;
use crate::model::Value;
use crate::sort::SortDescriptor;

/// Indices of rows passing every active filter, in original order.
pub(crate) fn filter_rows<R>(
    rows: &[R],
    filters: &[FilterDescriptor<R>],
    applied: &FilterValues,
) -> Vec<usize> {
    let active: Vec<_> = filters
        .iter()
        .filter_map(|descriptor| {
            applied
                .get(descriptor.field())
                .filter(|value| !value.is_empty())
                .map(|value| (descriptor, value))
        })
        .collect();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(descriptor, value)| value.matches(&descriptor.value(row)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Stable multi-key sort of row indices.
///
/// Sort values are read once per row. Keys naming unknown columns are
/// skipped.
pub(crate) fn sort_rows<R>(
    rows: &[R],
    indices: Vec<usize>,
    columns: &[Column<R>],
    sort: &SortDescriptor,
) -> Vec<usize> {
    if sort.is_empty() {
        return indices;
    }

    let mut resolved = SortDescriptor::new();
    let mut sort_columns = Vec::with_capacity(sort.len());
    for key in sort.keys() {
        if let Some(column) = columns.iter().find(|c| c.key() == key.column) {
            resolved.push(key.clone());
            sort_columns.push(column);
        }
    }

    let mut decorated: Vec<(usize, Vec<Value>)> = indices
        .into_iter()
        .map(|i| (i, sort_columns.iter().map(|c| c.value(&rows[i])).collect()))
        .collect();

    // slice::sort_by is stable
    decorated.sort_by(|(_, a), (_, b)| resolved.compare(a, b));

    decorated.into_iter().map(|(i, _)| i).collect()
}

/// The slice of `indices` shown on the current page.
pub(crate) fn paginate(indices: &[usize], range: Range<usize>) -> &[usize] {
    &indices[range.start.min(indices.len())..range.end.min(indices.len())]
}
