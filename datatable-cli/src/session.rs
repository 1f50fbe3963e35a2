//! Interactive session: executes commands against one table.

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use datatable_lib::DataTable;
use datatable_lib::filter::FilterValues;
use datatable_lib::filter::OptionSource;

use crate::command::Command;
use crate::command::HELP;
use crate::command::parse_filter_value;
use crate::error::CliError;
use crate::render;
use crate::row::JsonRow;

/// Callback events raised by the table, printed after each command.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: String) {
        log::debug!("Event: {}", event);
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    table: DataTable<JsonRow>,
    events: EventLog,
}

impl Session {
    pub fn new(table: DataTable<JsonRow>, events: EventLog) -> Self {
        Self { table, events }
    }

    #[cfg(test)]
    pub fn table(&self) -> &DataTable<JsonRow> {
        &self.table
    }

    /// Executes one command, writing its output and any raised events.
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, CliError> {
        log::debug!("Executing {:?}", command);
        let result = self.dispatch(command, out).await;
        for event in self.events.drain() {
            writeln!(out, "> {}", event)?;
        }
        result
    }

    async fn dispatch(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, CliError> {
        match command {
            Command::Show => self.show(out)?,
            Command::Sort(column) => {
                let direction = self.table.toggle_sort(&column)?;
                match direction {
                    Some(direction) => writeln!(out, "sorted by {} {}", column, direction.as_str())?,
                    None => writeln!(out, "{} unsorted", column)?,
                }
                self.show(out)?;
            }
            Command::Filter { field, value } => {
                let value = self.parse_value(&field, &value)?;
                let mut applied = self.table.applied_filters().clone();
                applied.set(field, value);
                self.table.apply_filters(applied)?;
                self.show(out)?;
            }
            Command::Open => {
                self.table.open_filters();
                self.show_draft(out)?;
            }
            Command::Set { field, value } => {
                let value = self.parse_value(&field, &value)?;
                self.table.set_draft(&field, value)?;
                self.show_draft(out)?;
            }
            Command::Apply => {
                self.table.apply_draft()?;
                self.show(out)?;
            }
            Command::Cancel => {
                self.table.cancel_draft();
                writeln!(out, "filters closed, draft discarded")?;
            }
            Command::Clear => {
                self.table.clear_draft()?;
                self.show_draft(out)?;
            }
            Command::Page(page) => self.go_to(page, out)?,
            Command::Next => self.go_to(self.table.page().saturating_add(1), out)?,
            Command::Prev => self.go_to(self.table.page().saturating_sub(1), out)?,
            Command::Refresh => {
                self.table.refresh();
                self.show(out)?;
            }
            Command::Click(n) => {
                if n == 0 || !self.table.click_row(n - 1) {
                    writeln!(out, "no row {} on this page", n)?;
                }
            }
            Command::Options { field, query } => {
                let needs_load = matches!(
                    self.table.filter(&field).map(|f| f.source()),
                    Some(OptionSource::Dynamic(_))
                ) && !self
                    .table
                    .options_state(&field)
                    .is_some_and(|state| state.is_ready());
                if needs_load {
                    self.table.load_options(&field).await?;
                }
                let options = self.table.search_options(&field, &query)?;
                writeln!(out, "{}", render::render_options(&options))?;
            }
            Command::Load(field) => {
                self.table.load_options(&field).await?;
                writeln!(out, "{} options loaded", self.table.options(&field).len())?;
            }
            Command::Params => {
                let params = self.table.query_params();
                if params.is_empty() {
                    writeln!(out, "(no active filters)")?;
                } else {
                    writeln!(out, "{}", params.to_query_string())?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn parse_value(&self, field: &str, raw: &str) -> Result<datatable_lib::filter::FilterValue, CliError> {
        let filter = self
            .table
            .filter(field)
            .ok_or_else(|| datatable_lib::TableError::unknown_filter(field))?;
        parse_filter_value(filter.kind(), raw)
    }

    fn go_to(&mut self, page: usize, out: &mut impl Write) -> Result<(), CliError> {
        self.table.set_page(page);
        self.show(out)
    }

    fn show(&self, out: &mut impl Write) -> Result<(), CliError> {
        writeln!(out, "{}", render::render_view(&self.table.view()))?;
        Ok(())
    }

    fn show_draft(&self, out: &mut impl Write) -> Result<(), CliError> {
        match self.table.draft_filters() {
            Some(draft) => writeln!(out, "draft: {}", describe(draft))?,
            None => writeln!(out, "filters closed")?,
        }
        Ok(())
    }
}

fn describe(values: &FilterValues) -> String {
    let active: Vec<String> = values
        .active()
        .map(|(field, value)| match serde_json::to_value(value) {
            Ok(json) => format!("{}={}", field, json["value"]),
            Err(_) => field.to_string(),
        })
        .collect();
    if active.is_empty() {
        "(none)".to_string()
    } else {
        active.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use datatable_lib::TableSettings;

    use super::*;
    use crate::view::ViewFile;

    const LOCAL: &str = r#"{
        "page_size": 2,
        "columns": [
            { "key": "name", "sortable": true },
            { "key": "severity" }
        ],
        "filters": [
            { "field": "name", "kind": "text" },
            { "field": "severity", "kind": "multi_choice", "options": ["critical", "info"] },
            { "field": "owner", "kind": "searchable_single_choice" }
        ],
        "rows": [
            { "id": 1, "name": "Disk full", "severity": "critical", "owner": "Platform" },
            { "id": 2, "name": "cpu", "severity": "info", "owner": "Payments" },
            { "id": 3, "name": "disk slow", "severity": "info", "owner": "Platform" }
        ]
    }"#;

    const SERVER: &str = r#"{
        "mode": "server_delegated",
        "columns": [{ "key": "name", "sortable": true }],
        "filters": [{ "field": "created_at", "kind": "date_range" }],
        "rows": [{ "id": 9, "name": "from server" }],
        "server_page": { "current_page": 1, "total_count": 30, "total_pages": 3, "has_next_page": true }
    }"#;

    fn session(json: &str) -> Session {
        let events = EventLog::default();
        let table = ViewFile::parse(json)
            .unwrap()
            .build(&TableSettings::default(), &events)
            .unwrap();
        Session::new(table, events)
    }

    async fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        let command = Command::parse(line).unwrap().unwrap();
        session.execute(command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_filter_and_sort() {
        let mut session = session(LOCAL);
        run(&mut session, "filter name DISK").await;
        let out = run(&mut session, "sort name").await;

        assert!(out.starts_with("sorted by name asc"));
        let names: Vec<String> = session.table().view().rows.iter().map(|r| r.field("name").to_string()).collect();
        assert_eq!(names, vec!["Disk full", "disk slow"]);
    }

    #[tokio::test]
    async fn test_popover_flow() {
        let mut session = session(LOCAL);
        run(&mut session, "open").await;
        let out = run(&mut session, "set severity info").await;
        assert_eq!(out.trim(), r#"draft: severity=["info"]"#);
        assert!(session.table().applied_filters().is_empty());

        run(&mut session, "apply").await;
        assert_eq!(session.table().visible_count(), 2);
    }

    #[tokio::test]
    async fn test_options_load_on_demand() {
        let mut session = session(LOCAL);
        let out = run(&mut session, "options owner pay").await;
        assert_eq!(out.trim(), "Payments");
    }

    #[tokio::test]
    async fn test_server_mode_relays_intent() {
        let mut session = session(SERVER);
        let out = run(&mut session, "filter created_at 2024-01-01T10:30..2024-01-02").await;
        assert!(out.contains(
            "> filter change: created_at=gte%3A2024-01-01T00%3A00%3A00.000Z&created_at=lte%3A2024-01-02T23%3A59%3A59.999Z"
        ));

        let out = run(&mut session, "page 7").await;
        assert!(out.contains("> page change: 3"));
        assert_eq!(session.table().page(), 1);
    }

    #[test]
    fn test_events_survive_poisoned_log() {
        let events = EventLog::default();
        events.push("before".to_string());
        let shared = events.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.0.lock().unwrap();
            panic!("writer died");
        })
        .join();
        assert!(events.0.is_poisoned());

        events.push("after".to_string());
        assert_eq!(events.drain(), vec!["before", "after"]);
        assert!(events.drain().is_empty());
    }

    #[tokio::test]
    async fn test_table_errors_are_returned() {
        let mut session = session(LOCAL);
        let mut out = Vec::new();
        let result = session.execute(Command::Sort("severity".into()), &mut out).await;
        assert!(matches!(result, Err(CliError::Table(_))));
        assert_eq!(
            session.execute(Command::Quit, &mut out).await.unwrap(),
            Flow::Quit
        );
    }
}
