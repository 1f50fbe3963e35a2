//! Column definitions.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Reads a cell value from a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Turns a cell value into display text.
pub type CellRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Sized by the presentation layer.
    #[default]
    Auto,
    /// Fixed width in display units.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
}

/// A table column definition.
///
/// Columns pair a key and header label with an accessor that reads the
/// cell value from a row. Width and alignment are carried for the
/// presentation layer and have no effect on the engine.
///
/// # Example
///
/// ```
/// use datatable_lib::{Alignment, Column};
///
/// struct Node {
///     name: String,
///     heap_used: i64,
/// }
///
/// let columns: Vec<Column<Node>> = vec![
///     Column::new("name", "Node", |n: &Node| n.name.as_str().into()).sortable(),
///     Column::new("heap_used", "Heap", |n: &Node| n.heap_used.into())
///         .align(Alignment::Right)
///         .render(|v| format!("{v} MB")),
/// ];
/// ```
pub struct Column<R> {
    key: String,
    label: String,
    width: ColumnWidth,
    align: Alignment,
    sortable: bool,
    accessor: Accessor<R>,
    render: Option<CellRenderer>,
}

impl<R> Column<R> {
    /// Create a new column with the given key, header label and accessor.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: ColumnWidth::default(),
            align: Alignment::default(),
            sortable: false,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set a flex width for this column.
    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }

    /// Set the width specification.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    ///
    /// Only sortable columns can enter the sort descriptor.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a display transform for cell values.
    pub fn render(mut self, render: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns the column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the width specification.
    pub fn width_spec(&self) -> ColumnWidth {
        self.width
    }

    /// Returns the alignment.
    pub fn alignment(&self) -> Alignment {
        self.align
    }

    /// Returns whether the column is sortable.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Read the cell value for a row.
    pub fn value(&self, row: &R) -> Value {
        (self.accessor)(row)
    }

    /// Render the cell text for a row.
    pub fn render_cell(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value),
            None => value.to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shard {
        index: String,
        docs: Option<i64>,
    }

    #[test]
    fn test_column_defaults() {
        let column = Column::new("index", "Index", |s: &Shard| s.index.as_str().into());
        assert_eq!(column.key(), "index");
        assert_eq!(column.label(), "Index");
        assert!(!column.is_sortable());
        assert_eq!(column.width_spec(), ColumnWidth::Auto);
        assert_eq!(column.alignment(), Alignment::Left);
    }

    #[test]
    fn test_render_cell() {
        let shard = Shard {
            index: "logs-2024".to_string(),
            docs: Some(1200),
        };
        let plain = Column::new("docs", "Docs", |s: &Shard| s.docs.into());
        let rendered = Column::new("docs", "Docs", |s: &Shard| s.docs.into())
            .render(|v| format!("{v} docs"));

        assert_eq!(plain.render_cell(&shard), "1200");
        assert_eq!(rendered.render_cell(&shard), "1200 docs");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let shard = Shard {
            index: "logs".to_string(),
            docs: None,
        };
        let column = Column::new("docs", "Docs", |s: &Shard| s.docs.into());
        assert_eq!(column.render_cell(&shard), "");
    }
}
