//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use datatable_lib::filter::FilterDescriptor;
use datatable_lib::filter::FilterOption;
use datatable_lib::{Column, Mode, TableConfig, TableRow};

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: u32,
    pub name: &'static str,
    pub severity: &'static str,
    pub count: i64,
    pub created_at: DateTime<Utc>,
}

impl TableRow for Alert {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .unwrap()
        .and_utc()
}

pub fn alerts() -> Vec<Alert> {
    vec![
        Alert { id: 1, name: "Disk Full", severity: "critical", count: 4, created_at: at(2024, 1, 1, 9) },
        Alert { id: 2, name: "High Latency", severity: "warning", count: 2, created_at: at(2024, 1, 2, 23) },
        Alert { id: 3, name: "disk slow", severity: "warning", count: 4, created_at: at(2024, 1, 3, 0) },
        Alert { id: 4, name: "Heap Pressure", severity: "info", count: 7, created_at: at(2024, 1, 5, 12) },
        Alert { id: 5, name: "Packet Loss", severity: "critical", count: 2, created_at: at(2024, 1, 2, 1) },
    ]
}

pub fn config(mode: Mode) -> TableConfig<Alert> {
    TableConfig::new(mode)
        .column(Column::new("name", "Name", |a: &Alert| a.name.into()).sortable())
        .column(Column::new("severity", "Severity", |a: &Alert| a.severity.into()).sortable())
        .column(Column::new("count", "Count", |a: &Alert| a.count.into()).sortable())
        .column(Column::new("created_at", "Created", |a: &Alert| a.created_at.into()))
        .filter(FilterDescriptor::text("name", "Name", |a: &Alert| a.name.into()))
        .filter(
            FilterDescriptor::multi_choice("severity", "Severity", |a: &Alert| a.severity.into())
                .options(["critical", "warning", "info"].map(FilterOption::from_value)),
        )
        .filter(FilterDescriptor::range("count", "Count", |a: &Alert| a.count.into()))
        .filter(FilterDescriptor::date_range("created_at", "Created", |a: &Alert| {
            a.created_at.into()
        }))
}

pub fn ids<'a>(rows: impl IntoIterator<Item = &'a Alert>) -> Vec<u32> {
    rows.into_iter().map(|a| a.id).collect()
}

/// Collects callback payloads.
pub fn recorder<T>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    (Arc::clone(&events), events)
}
