//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::filter::FilterDescriptor;
use crate::filter::QueryParams;
use crate::sort::SortDescriptor;
use crate::table::TableCallbacks;

/// Where filtering, sorting and pagination happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The engine filters, sorts and paginates the full row set in memory.
    #[default]
    Local,
    /// The engine tracks UI state and relays changes; the caller supplies
    /// each page of rows.
    ServerDelegated,
}

/// Row spacing hint for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    #[default]
    Standard,
    Comfortable,
}

/// What to show when no rows survive filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyState {
    /// Message shown instead of an empty table body.
    pub message: String,
    /// Padding around the message, in display units.
    pub padding: u16,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: "No data".to_string(),
            padding: 16,
        }
    }
}

impl EmptyState {
    /// Creates an empty state with a custom message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }
}

/// Serializable table settings.
///
/// # Example
///
/// ```
/// use datatable_lib::{Density, TableSettings};
///
/// let settings: TableSettings = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
/// assert_eq!(settings.page_size, 25);
/// assert_eq!(settings.density, Density::Standard);
/// assert_eq!(settings.empty_state.message, "No data");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,
    /// Display density.
    ///
    /// Default: standard
    pub density: Density,
    /// Empty-state text and padding.
    pub empty_state: EmptyState,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            density: Density::default(),
            empty_state: EmptyState::default(),
        }
    }
}

/// Declarative table configuration, fixed for the table's lifetime.
///
/// # Example
///
/// ```
/// use datatable_lib::{Column, DataTable, TableConfig, TableRow};
/// use datatable_lib::filter::FilterDescriptor;
///
/// struct Alert {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for Alert {
///     type Key = u32;
///     fn key(&self) -> u32 {
///         self.id
///     }
/// }
///
/// let config = TableConfig::local()
///     .column(Column::new("name", "Name", |a: &Alert| a.name.as_str().into()).sortable())
///     .filter(FilterDescriptor::text("name", "Name", |a: &Alert| a.name.as_str().into()))
///     .page_size(20);
///
/// let table = DataTable::new(config).unwrap();
/// assert_eq!(table.page_size(), 20);
/// ```
pub struct TableConfig<R> {
    pub(crate) mode: Mode,
    pub(crate) columns: Vec<Column<R>>,
    pub(crate) filters: Vec<FilterDescriptor<R>>,
    pub(crate) settings: TableSettings,
    pub(crate) callbacks: TableCallbacks<R>,
}

impl<R> TableConfig<R> {
    /// Creates a configuration for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            columns: Vec::new(),
            filters: Vec::new(),
            settings: TableSettings::default(),
            callbacks: TableCallbacks::default(),
        }
    }

    /// Creates a local-mode configuration.
    pub fn local() -> Self {
        Self::new(Mode::Local)
    }

    /// Creates a server-delegated configuration.
    pub fn server_delegated() -> Self {
        Self::new(Mode::ServerDelegated)
    }

    /// Adds a column.
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds several columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column<R>>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Adds a filter.
    pub fn filter(mut self, filter: FilterDescriptor<R>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds several filters.
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterDescriptor<R>>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Replaces the settings.
    pub fn settings(mut self, settings: TableSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.settings.page_size = page_size;
        self
    }

    /// Sets the display density.
    pub fn density(mut self, density: Density) -> Self {
        self.settings.density = density;
        self
    }

    /// Sets the empty state.
    pub fn empty_state(mut self, empty_state: EmptyState) -> Self {
        self.settings.empty_state = empty_state;
        self
    }

    /// Called with the flattened query parameters when filters are applied
    /// in server-delegated mode.
    pub fn on_filter_change(mut self, f: impl FnMut(&QueryParams) + Send + 'static) -> Self {
        self.callbacks.on_filter_change = Some(Box::new(f));
        self
    }

    /// Called with the new sort descriptor when sorting changes in
    /// server-delegated mode.
    pub fn on_sort_change(mut self, f: impl FnMut(&SortDescriptor) + Send + 'static) -> Self {
        self.callbacks.on_sort_change = Some(Box::new(f));
        self
    }

    /// Called with the requested page in server-delegated mode.
    pub fn on_page_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.callbacks.on_page_change = Some(Box::new(f));
        self
    }

    /// Called after [`DataTable::refresh`](crate::DataTable::refresh) clears the sort.
    pub fn on_refresh(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.callbacks.on_refresh = Some(Box::new(f));
        self
    }

    /// Called with the clicked row.
    pub fn on_row_click(mut self, f: impl FnMut(&R) + Send + 'static) -> Self {
        self.callbacks.on_row_click = Some(Box::new(f));
        self
    }
}
