//! Render-ready snapshot of a table.

use crate::column::Alignment;
use crate::column::Column;
use crate::column::ColumnWidth;
use crate::config::Density;
use crate::config::EmptyState;
use crate::page::PageInfo;
use crate::sort::Direction;

/// What the body of the table should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    /// Rows are being fetched.
    Loading,
    /// No rows survived filtering (or the server returned none).
    Empty(&'a EmptyState),
    /// Rows are available.
    Rows,
}

/// A column header with its sort indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub sortable: bool,
    /// Direction and priority (0 = primary) if the column is sorted.
    pub sort: Option<(Direction, usize)>,
    pub width: ColumnWidth,
    pub align: Alignment,
}

impl HeaderCell<'_> {
    /// Header text with an arrow and, for secondary keys, the priority.
    pub fn title(&self) -> String {
        match self.sort {
            None => self.label.to_string(),
            Some((direction, priority)) => {
                let arrow = match direction {
                    Direction::Asc => "↑",
                    Direction::Desc => "↓",
                };
                if priority == 0 {
                    format!("{} {}", self.label, arrow)
                } else {
                    format!("{} {}{}", self.label, arrow, priority + 1)
                }
            }
        }
    }
}

/// Everything a presentation layer needs to draw the current page.
#[derive(Debug)]
pub struct TableView<'a, R> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a R>,
    pub headers: Vec<HeaderCell<'a>>,
    pub page: PageInfo,
    pub state: ViewState<'a>,
    pub density: Density,
    pub(crate) columns: &'a [Column<R>],
}

impl<R> TableView<'_, R> {
    /// Rendered cell text, one inner vector per row.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| c.render_cell(row)).collect())
            .collect()
    }

    /// Returns `true` if rows should be drawn.
    pub fn has_rows(&self) -> bool {
        matches!(self.state, ViewState::Rows)
    }
}
