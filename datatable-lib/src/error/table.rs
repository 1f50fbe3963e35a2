//! TableError for configuration and interaction errors

/// Error type for table configuration and interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No column with the given key exists.
    #[error("Column '{column}' not found")]
    UnknownColumn { column: String },

    /// The column exists but was not declared sortable.
    #[error("Column '{column}' is not sortable")]
    NotSortable { column: String },

    /// No filter is declared for the given field.
    #[error("Filter '{field}' not found")]
    UnknownFilter { field: String },

    /// The filter value does not match the filter kind.
    #[error("Filter '{field}' kind mismatch: expected {expected}, got {actual}")]
    FilterKindMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Page size must be at least one.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// Two columns share the same key.
    #[error("Duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// Two filters share the same field.
    #[error("Duplicate filter '{field}'")]
    DuplicateFilter { field: String },

    /// A choice filter was declared without an option source.
    #[error("Filter '{field}' requires options")]
    MissingOptions { field: String },

    /// The filter has no asynchronous option loader.
    #[error("Filter '{field}' has no option loader")]
    NoOptionLoader { field: String },

    /// A draft operation was attempted while the filter popover is closed.
    #[error("Filter popover is closed")]
    PopoverClosed,
}

impl TableError {
    /// Creates a new unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Creates a new not sortable error.
    pub fn not_sortable(column: impl Into<String>) -> Self {
        Self::NotSortable {
            column: column.into(),
        }
    }

    /// Creates a new unknown filter error.
    pub fn unknown_filter(field: impl Into<String>) -> Self {
        Self::UnknownFilter {
            field: field.into(),
        }
    }

    /// Creates a new kind mismatch error.
    pub fn kind_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::FilterKindMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}
