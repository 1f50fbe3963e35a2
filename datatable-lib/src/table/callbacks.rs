//! Upward callbacks from the table to its caller.

use std::fmt;

use crate::filter::QueryParams;
use crate::sort::SortDescriptor;

/// Optional change callbacks, set through [`TableConfig`](crate::TableConfig).
pub struct TableCallbacks<R> {
    pub(crate) on_filter_change: Option<Box<dyn FnMut(&QueryParams) + Send>>,
    pub(crate) on_sort_change: Option<Box<dyn FnMut(&SortDescriptor) + Send>>,
    pub(crate) on_page_change: Option<Box<dyn FnMut(usize) + Send>>,
    pub(crate) on_refresh: Option<Box<dyn FnMut() + Send>>,
    pub(crate) on_row_click: Option<Box<dyn FnMut(&R) + Send>>,
}

impl<R> TableCallbacks<R> {
    pub(crate) fn filter_changed(&mut self, params: &QueryParams) {
        if let Some(f) = self.on_filter_change.as_mut() {
            f(params);
        }
    }

    pub(crate) fn sort_changed(&mut self, sort: &SortDescriptor) {
        if let Some(f) = self.on_sort_change.as_mut() {
            f(sort);
        }
    }

    pub(crate) fn page_changed(&mut self, page: usize) {
        if let Some(f) = self.on_page_change.as_mut() {
            f(page);
        }
    }

    pub(crate) fn refreshed(&mut self) {
        if let Some(f) = self.on_refresh.as_mut() {
            f();
        }
    }

    pub(crate) fn row_clicked(&mut self, row: &R) {
        if let Some(f) = self.on_row_click.as_mut() {
            f(row);
        }
    }
}

impl<R> Default for TableCallbacks<R> {
    fn default() -> Self {
        Self {
            on_filter_change: None,
            on_sort_change: None,
            on_page_change: None,
            on_refresh: None,
            on_row_click: None,
        }
    }
}

impl<R> fmt::Debug for TableCallbacks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("on_filter_change", &self.on_filter_change.is_some())
            .field("on_sort_change", &self.on_sort_change.is_some())
            .field("on_page_change", &self.on_page_change.is_some())
            .field("on_refresh", &self.on_refresh.is_some())
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}
