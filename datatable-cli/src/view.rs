//! View files: a JSON description of a table and its rows.
//!
//! ```json
//! {
//!   "mode": "local",
//!   "id_field": "id",
//!   "page_size": 5,
//!   "columns": [
//!     { "key": "name", "label": "Name", "sortable": true },
//!     { "key": "count", "label": "Count", "sortable": true, "align": "right" }
//!   ],
//!   "filters": [
//!     { "field": "severity", "kind": "multi_choice", "options": ["critical", "info"] },
//!     { "field": "owner", "kind": "searchable_single_choice" },
//!     { "field": "created_at", "kind": "date_range" }
//!   ],
//!   "rows": [ { "id": 1, "name": "Disk full", "count": 3 } ]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use datatable_lib::filter::FilterDescriptor;
use datatable_lib::filter::FilterKind;
use datatable_lib::filter::FilterOption;
use datatable_lib::filter::ValueTransform;
use datatable_lib::{
    Alignment, Column, ColumnWidth, DataTable, Density, EmptyState, Mode, ServerPage, TableConfig,
    TableRow, TableSettings,
};
use serde::Deserialize;
use serde_json::Map;

use crate::error::CliError;
use crate::loader::DistinctLoader;
use crate::row::JsonRow;
use crate::session::EventLog;

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: Option<String>,
    /// Row field read by the column; defaults to `key`.
    pub field: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub width: ColumnWidth,
    /// Appended to every non-empty cell, e.g. a unit.
    pub suffix: Option<String>,
}

/// Server-side encoding of a filter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformSpec {
    /// The filter kind's default.
    #[default]
    Default,
    /// Forward raw values.
    None,
    WholeDayRange,
    ExactRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub label: Option<String>,
    pub kind: FilterKind,
    /// Fixed options.
    #[serde(default)]
    pub options: Vec<String>,
    /// Load options from the distinct values of the field. Implied for
    /// choice kinds without fixed options.
    #[serde(default)]
    pub distinct_options: bool,
    #[serde(default)]
    pub transform: TransformSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewFile {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default)]
    pub rows: Vec<Map<String, serde_json::Value>>,
    pub page_size: Option<usize>,
    pub density: Option<Density>,
    pub empty_message: Option<String>,
    /// Pagination metadata of `rows` in server-delegated mode.
    pub server_page: Option<ServerPage>,
    /// Simulated latency of option loads, in milliseconds.
    #[serde(default)]
    pub load_delay_ms: u64,
}

fn default_id_field() -> String {
    "id".to_string()
}

impl ViewFile {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Table settings: `defaults` with this view's overrides.
    pub fn settings(&self, defaults: &TableSettings) -> TableSettings {
        let mut settings = defaults.clone();
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(density) = self.density {
            settings.density = density;
        }
        if let Some(message) = &self.empty_message {
            settings.empty_state = EmptyState::new(message.clone()).with_padding(settings.empty_state.padding);
        }
        settings
    }

    /// Builds the table, loads the rows and wires callbacks into `events`.
    pub fn build(self, defaults: &TableSettings, events: &EventLog) -> Result<DataTable<JsonRow>, CliError> {
        let rows: Vec<JsonRow> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, fields)| JsonRow::new(fields.clone(), &self.id_field, i))
            .collect();
        let delay = Duration::from_millis(self.load_delay_ms);

        let config = TableConfig::new(self.mode)
            .settings(self.settings(defaults))
            .columns(self.columns.iter().map(build_column))
            .filters(self.filters.iter().map(|spec| build_filter(spec, &rows, delay)));
        let config = wire_callbacks(config, events);

        let mut table = DataTable::new(config)?;
        table.set_rows(rows);
        if let Some(page) = self.server_page {
            table.set_server_page(page);
        }
        log::info!(
            "Opened {:?} view with {} rows",
            table.mode(),
            table.rows().len()
        );
        Ok(table)
    }
}

fn build_column(spec: &ColumnSpec) -> Column<JsonRow> {
    let field = spec.field.clone().unwrap_or_else(|| spec.key.clone());
    let label = spec.label.clone().unwrap_or_else(|| spec.key.clone());

    let mut column = Column::new(spec.key.clone(), label, move |row: &JsonRow| row.field(&field))
        .align(spec.align)
        .width(spec.width);
    if spec.sortable {
        column = column.sortable();
    }
    if let Some(suffix) = spec.suffix.clone() {
        column = column.render(move |value| {
            if value.is_null() {
                String::new()
            } else {
                format!("{}{}", value, suffix)
            }
        });
    }
    column
}

fn build_filter(spec: &FilterSpec, rows: &[JsonRow], delay: Duration) -> FilterDescriptor<JsonRow> {
    let field = spec.field.clone();
    let label = spec.label.clone().unwrap_or_else(|| spec.field.clone());
    let accessor = move |row: &JsonRow| row.field(&field);

    let mut filter = match spec.kind {
        FilterKind::DateRange => FilterDescriptor::date_range(spec.field.clone(), label, accessor),
        kind => FilterDescriptor::new(spec.field.clone(), label, kind, accessor),
    };

    if spec.kind.has_options() {
        if spec.distinct_options || spec.options.is_empty() {
            filter = filter.loader(DistinctLoader::new(rows, &spec.field, delay));
        } else {
            filter = filter.options(spec.options.iter().cloned().map(FilterOption::from_value));
        }
    }

    match spec.transform {
        TransformSpec::Default => filter,
        TransformSpec::None => filter.without_transform(),
        TransformSpec::WholeDayRange => filter.transform(ValueTransform::WholeDayRange),
        TransformSpec::ExactRange => filter.transform(ValueTransform::ExactRange),
    }
}

fn wire_callbacks(config: TableConfig<JsonRow>, events: &EventLog) -> TableConfig<JsonRow> {
    let filter_events = events.clone();
    let sort_events = events.clone();
    let page_events = events.clone();
    let refresh_events = events.clone();
    let click_events = events.clone();

    config
        .on_filter_change(move |params| {
            filter_events.push(format!("filter change: {}", params.to_query_string()));
        })
        .on_sort_change(move |sort| {
            let keys: Vec<String> = sort
                .keys()
                .iter()
                .map(|k| format!("{} {}", k.column, k.direction.as_str()))
                .collect();
            sort_events.push(format!("sort change: [{}]", keys.join(", ")));
        })
        .on_page_change(move |page| page_events.push(format!("page change: {}", page)))
        .on_refresh(move || refresh_events.push("refresh".to_string()))
        .on_row_click(move |row| click_events.push(format!("row click: {}", row.key())))
}
