//! The tabular data engine.
//!
//! [`DataTable`] owns the row set and the interaction state of one table:
//! applied filters, the filter popover, the sort descriptor and the current
//! page. In [`Mode::Local`] it derives the visible rows itself; in
//! [`Mode::ServerDelegated`] it displays the rows it is given and forwards
//! user intent through the configured callbacks.

mod callbacks;
mod pipeline;
mod view;

use std::collections::HashMap;
use std::sync::Arc;

pub use callbacks::TableCallbacks;
pub use view::HeaderCell;
pub use view::TableView;
pub use view::ViewState;

use crate::column::Column;
use crate::config::Mode;
use crate::config::TableConfig;
use crate::config::TableSettings;
use crate::error::OptionLoadError;
use crate::error::TableError;
use crate::filter::FilterDescriptor;
use crate::filter::FilterOption;
use crate::filter::FilterPopover;
use crate::filter::FilterValue;
use crate::filter::FilterValues;
use crate::filter::LoadTicket;
use crate::filter::OptionLoader;
use crate::filter::OptionSet;
use crate::filter::OptionSource;
use crate::filter::OptionsState;
use crate::filter::QueryParams;
use crate::filter::fuzzy_rank;
use crate::filter::raw_params;
use crate::model::TableRow;
use crate::page::PageInfo;
use crate::page::Pagination;
use crate::page::ServerPage;
use crate::page::clamp_page;
use crate::sort::Direction;
use crate::sort::SortDescriptor;

/// A table: configuration plus rows plus interaction state.
///
/// # Example
///
/// ```
/// use datatable_lib::{Column, DataTable, Direction, TableConfig, TableRow};
/// use datatable_lib::filter::{FilterDescriptor, FilterValue, FilterValues};
///
/// struct Alert {
///     id: u32,
///     name: &'static str,
///     count: i64,
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
///     .column(Column::new("name", "Name", |a: &Alert| a.name.into()))
///     .column(Column::new("count", "Count", |a: &Alert| a.count.into()).sortable())
///     .filter(FilterDescriptor::text("name", "Name", |a: &Alert| a.name.into()));
///
/// let mut table = DataTable::new(config).unwrap();
/// table.set_rows(vec![
///     Alert { id: 1, name: "Disk full", count: 4 },
///     Alert { id: 2, name: "High latency", count: 9 },
///     Alert { id: 3, name: "Disk slow", count: 1 },
/// ]);
///
/// table.apply_filters(FilterValues::new().with("name", FilterValue::text("disk"))).unwrap();
/// assert_eq!(table.toggle_sort("count").unwrap(), Some(Direction::Asc));
///
/// let ids: Vec<u32> = table.view().rows.iter().map(|a| a.id).collect();
/// assert_eq!(ids, vec![3, 1]);
/// ```
pub struct DataTable<R: TableRow> {
    mode: Mode,
    columns: Vec<Column<R>>,
    filters: Vec<FilterDescriptor<R>>,
    options: HashMap<String, OptionSet>,
    settings: TableSettings,
    callbacks: TableCallbacks<R>,
    rows: Vec<R>,
    /// Local mode: filtered and sorted row indices. Server mode: every index.
    visible: Vec<usize>,
    applied: FilterValues,
    popover: FilterPopover,
    sort: SortDescriptor,
    pagination: Pagination,
    server_page: ServerPage,
    loading: bool,
}

impl<R: TableRow> DataTable<R> {
    /// Builds a table from its configuration.
    pub fn new(config: TableConfig<R>) -> Result<Self, TableError> {
        let TableConfig {
            mode,
            columns,
            filters,
            settings,
            callbacks,
        } = config;

        if settings.page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key() == column.key()) {
                return Err(TableError::DuplicateColumn {
                    column: column.key().to_string(),
                });
            }
        }

        let mut options = HashMap::new();
        for (i, filter) in filters.iter().enumerate() {
            if filters[..i].iter().any(|f| f.field() == filter.field()) {
                return Err(TableError::DuplicateFilter {
                    field: filter.field().to_string(),
                });
            }
            filter.validate()?;

            match filter.source() {
                OptionSource::Static(list) => {
                    options.insert(filter.field().to_string(), OptionSet::ready(list.clone()));
                }
                OptionSource::Dynamic(_) => {
                    options.insert(filter.field().to_string(), OptionSet::default());
                }
                OptionSource::None => {}
            }
        }

        log::debug!(
            "Configured {:?} table with {} columns, {} filters, page size {}",
            mode,
            columns.len(),
            filters.len(),
            settings.page_size
        );

        Ok(Self {
            mode,
            columns,
            filters,
            options,
            pagination: Pagination::new(settings.page_size),
            settings,
            callbacks,
            rows: Vec::new(),
            visible: Vec::new(),
            applied: FilterValues::new(),
            popover: FilterPopover::new(),
            sort: SortDescriptor::new(),
            server_page: ServerPage::default(),
            loading: false,
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the columns in display order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Returns the filter descriptors.
    pub fn filters(&self) -> &[FilterDescriptor<R>] {
        &self.filters
    }

    /// Returns the descriptor of a filter.
    pub fn filter(&self, field: &str) -> Option<&FilterDescriptor<R>> {
        self.filters.iter().find(|f| f.field() == field)
    }

    /// Returns the settings.
    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replaces the rows.
    ///
    /// In local mode this is the full data set and the current page is
    /// clamped to the new page count. In server-delegated mode these are the
    /// rows of the current page, displayed as given.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        log::debug!("Received {} rows", rows.len());
        self.rows = rows;
        self.recompute();
        if self.mode == Mode::Local {
            let page = self.pagination.page();
            self.pagination.set_page(page, self.visible.len());
        }
    }

    /// Returns every row, unfiltered and in original order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Finds a row by key.
    pub fn row(&self, key: &R::Key) -> Option<&R> {
        self.rows.iter().find(|row| &row.key() == key)
    }

    /// Number of rows after filtering (local) or as given (server).
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns `true` while rows are being fetched.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sets the pagination metadata of the current server page.
    pub fn set_server_page(&mut self, page: ServerPage) {
        self.server_page = page;
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Advances the sort cycle of a column: ascending, descending, removed.
    ///
    /// Returns the column's new direction, or `None` once removed. In local
    /// mode the page returns to 1; in server-delegated mode the caller owns
    /// the page and answers with a new [`ServerPage`].
    pub fn toggle_sort(&mut self, column: &str) -> Result<Option<Direction>, TableError> {
        let col = self
            .columns
            .iter()
            .find(|c| c.key() == column)
            .ok_or_else(|| TableError::unknown_column(column))?;
        if !col.is_sortable() {
            return Err(TableError::not_sortable(column));
        }

        let direction = self.sort.toggle(column);
        log::debug!("Sort on '{}' is now {:?}", column, direction);

        match self.mode {
            Mode::Local => {
                self.pagination.reset();
                self.recompute();
            }
            Mode::ServerDelegated => self.callbacks.sort_changed(&self.sort),
        }
        Ok(direction)
    }

    /// Returns the sort descriptor.
    pub fn sort(&self) -> &SortDescriptor {
        &self.sort
    }

    /// Clears the sort and notifies the refresh callback.
    pub fn refresh(&mut self) {
        log::debug!("Refresh requested");
        self.sort.clear();
        if self.mode == Mode::Local {
            self.recompute();
        }
        self.callbacks.refreshed();
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Replaces the applied filter values.
    ///
    /// Every field must name a declared filter and every value must fit the
    /// filter's kind. Local mode returns to page 1. In server-delegated mode
    /// the values are flattened into [`QueryParams`] and passed to the
    /// filter-change callback; the caller resets its own page.
    pub fn apply_filters(&mut self, values: FilterValues) -> Result<(), TableError> {
        for (field, value) in values.iter() {
            self.check_value(field, value)?;
        }

        log::debug!("Applying {} filter values", values.len());
        self.applied = values;

        match self.mode {
            Mode::Local => {
                self.pagination.reset();
                self.recompute();
            }
            Mode::ServerDelegated => {
                let params = self.query_params();
                self.callbacks.filter_changed(&params);
            }
        }
        Ok(())
    }

    /// Returns the applied filter values.
    pub fn applied_filters(&self) -> &FilterValues {
        &self.applied
    }

    /// Flattens the applied values into query parameters, keyed and ordered
    /// by field name.
    ///
    /// Inactive values are skipped. Filters with a transform use it; others
    /// forward the raw value.
    pub fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        for filter in &self.filters {
            let Some(value) = self.applied.get(filter.field()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let values = match filter.value_transform() {
                Some(transform) => transform.apply(value),
                None => raw_params(value),
            };
            if !values.is_empty() {
                params.insert(filter.field(), values);
            }
        }
        params
    }

    fn check_value(&self, field: &str, value: &FilterValue) -> Result<(), TableError> {
        let filter = self
            .filter(field)
            .ok_or_else(|| TableError::unknown_filter(field))?;
        if !value.accepts(filter.kind()) {
            return Err(TableError::kind_mismatch(
                field,
                filter.kind().name(),
                value.type_name(),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Filter popover
    // =========================================================================

    /// Opens the filter popover with a draft copy of the applied values.
    pub fn open_filters(&mut self) {
        self.popover.open(&self.applied);
    }

    /// Returns the filter popover.
    pub fn popover(&self) -> &FilterPopover {
        &self.popover
    }

    /// Returns `true` while the filter popover is open.
    pub fn is_filter_open(&self) -> bool {
        self.popover.is_open()
    }

    /// Returns the draft values while the popover is open.
    pub fn draft_filters(&self) -> Option<&FilterValues> {
        self.popover.draft()
    }

    /// Sets a draft value. Applied values are untouched.
    pub fn set_draft(&mut self, field: &str, value: FilterValue) -> Result<(), TableError> {
        self.check_value(field, &value)?;
        self.popover.set(field, value)
    }

    /// Applies the draft and closes the popover.
    pub fn apply_draft(&mut self) -> Result<(), TableError> {
        let draft = self.popover.take()?;
        self.apply_filters(draft)
    }

    /// Discards the draft and closes the popover.
    pub fn cancel_draft(&mut self) {
        self.popover.cancel();
    }

    /// Blanks the draft. The popover stays open and applied values stay in
    /// effect until the draft is applied.
    pub fn clear_draft(&mut self) -> Result<(), TableError> {
        self.popover.clear()
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Returns the current options of a choice filter.
    ///
    /// Empty while loading, before the first load, and for unknown fields.
    pub fn options(&self, field: &str) -> &[FilterOption] {
        self.options
            .get(field)
            .map(|set| set.state().options())
            .unwrap_or_default()
    }

    /// Returns the option state of a choice filter.
    pub fn options_state(&self, field: &str) -> Option<&OptionsState> {
        self.options.get(field).map(OptionSet::state)
    }

    /// Fuzzy-searches the options of a filter by label.
    pub fn search_options(&self, field: &str, query: &str) -> Result<Vec<&FilterOption>, TableError> {
        if self.filter(field).is_none() {
            return Err(TableError::unknown_filter(field));
        }
        Ok(fuzzy_rank(query, self.options(field)))
    }

    /// Marks a filter's options as loading and returns the ticket and loader
    /// for the request.
    ///
    /// Pass the loader's result to [`finish_option_load`](Self::finish_option_load).
    /// Only the most recent ticket per filter is accepted.
    pub fn begin_option_load(
        &mut self,
        field: &str,
    ) -> Result<(LoadTicket, Arc<dyn OptionLoader>), TableError> {
        let filter = self
            .filter(field)
            .ok_or_else(|| TableError::unknown_filter(field))?;
        let OptionSource::Dynamic(loader) = filter.source() else {
            return Err(TableError::NoOptionLoader {
                field: field.to_string(),
            });
        };
        let loader = Arc::clone(loader);

        let ticket = self.options.entry(field.to_string()).or_default().begin(field);
        log::debug!("Loading options for '{}' (request {})", field, ticket.id());
        Ok((ticket, loader))
    }

    /// Stores the result of an option load.
    ///
    /// Returns `false` if a newer load was started since the ticket was
    /// issued; the result is dropped. Failures are logged and leave the
    /// filter with no options.
    pub fn finish_option_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<FilterOption>, OptionLoadError>,
    ) -> bool {
        match self.options.get_mut(ticket.field()) {
            Some(set) => set.finish(ticket, result),
            None => false,
        }
    }

    /// Loads a filter's options through its loader.
    pub async fn load_options(&mut self, field: &str) -> Result<(), TableError> {
        let (ticket, loader) = self.begin_option_load(field)?;
        let result = loader.load().await;
        self.finish_option_load(&ticket, result);
        Ok(())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Requests a page, clamped to `[1, total_pages]`, and returns it.
    ///
    /// Local mode moves to the page. Server-delegated mode leaves the state
    /// alone and passes the page to the page-change callback; the caller
    /// answers with new rows and a new [`ServerPage`].
    pub fn set_page(&mut self, page: usize) -> usize {
        match self.mode {
            Mode::Local => {
                let page = self.pagination.set_page(page, self.visible.len());
                log::debug!("Moved to page {}", page);
                page
            }
            Mode::ServerDelegated => {
                let page = clamp_page(page, self.server_page.total_pages);
                log::debug!("Requesting page {}", page);
                self.callbacks.page_changed(page);
                page
            }
        }
    }

    /// Returns the current page.
    pub fn page(&self) -> usize {
        match self.mode {
            Mode::Local => self.pagination.page(),
            Mode::ServerDelegated => self.server_page.current_page,
        }
    }

    /// Returns the pagination metadata for page controls.
    pub fn page_info(&self) -> PageInfo {
        match self.mode {
            Mode::Local => PageInfo::local(&self.pagination, self.visible.len()),
            Mode::ServerDelegated => PageInfo::server(&self.server_page),
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Builds a render-ready snapshot of the current page.
    pub fn view(&self) -> TableView<'_, R> {
        let rows: Vec<&R> = self.page_indices().iter().map(|&i| &self.rows[i]).collect();

        let state = if self.loading {
            ViewState::Loading
        } else if rows.is_empty() {
            ViewState::Empty(&self.settings.empty_state)
        } else {
            ViewState::Rows
        };

        let headers = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key(),
                label: c.label(),
                sortable: c.is_sortable(),
                sort: self.sort.direction_of(c.key()),
                width: c.width_spec(),
                align: c.alignment(),
            })
            .collect();

        TableView {
            rows,
            headers,
            page: self.page_info(),
            state,
            density: self.settings.density,
            columns: &self.columns,
        }
    }

    /// Renders the cells of a row in column order.
    pub fn render_cells(&self, row: &R) -> Vec<String> {
        self.columns.iter().map(|c| c.render_cell(row)).collect()
    }

    /// Notifies the row-click callback for the row at `index` of the current
    /// page. Returns `false` if there is no such row.
    pub fn click_row(&mut self, index: usize) -> bool {
        let Some(&i) = self.page_indices().get(index) else {
            return false;
        };
        let row = &self.rows[i];
        log::debug!("Row '{}' clicked", row.key());
        self.callbacks.row_clicked(row);
        true
    }

    fn page_indices(&self) -> &[usize] {
        match self.mode {
            Mode::Local => pipeline::paginate(&self.visible, self.pagination.range(self.visible.len())),
            Mode::ServerDelegated => &self.visible,
        }
    }

    fn recompute(&mut self) {
        self.visible = match self.mode {
            Mode::Local => {
                let filtered = pipeline::filter_rows(&self.rows, &self.filters, &self.applied);
                pipeline::sort_rows(&self.rows, filtered, &self.columns, &self.sort)
            }
            Mode::ServerDelegated => (0..self.rows.len()).collect(),
        };
    }
}

impl<R: TableRow> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("mode", &self.mode)
            .field("columns", &self.columns.len())
            .field("filters", &self.filters.len())
            .field("rows", &self.rows.len())
            .field("visible", &self.visible.len())
            .field("applied", &self.applied)
            .field("sort", &self.sort)
            .field("page", &self.page())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}
