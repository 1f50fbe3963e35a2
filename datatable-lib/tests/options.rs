//! Asynchronous option loading for choice filters.

mod common;

use std::time::Duration;

use async_trait::async_trait;
use common::{Alert, config};
use datatable_lib::filter::{FilterDescriptor, FilterOption, OptionLoader, OptionsState};
use datatable_lib::{DataTable, Mode, OptionLoadError, TableError};

struct Owners {
    delay: Duration,
}

#[async_trait]
impl OptionLoader for Owners {
    async fn load(&self) -> Result<Vec<FilterOption>, OptionLoadError> {
        tokio::time::sleep(self.delay).await;
        Ok(["Platform Team", "Payments", "Data Platform"]
            .into_iter()
            .map(FilterOption::from_value)
            .collect())
    }
}

struct Broken;

#[async_trait]
impl OptionLoader for Broken {
    async fn load(&self) -> Result<Vec<FilterOption>, OptionLoadError> {
        Err(OptionLoadError::new("connection refused"))
    }
}

fn owner(a: &Alert) -> datatable_lib::Value {
    a.name.into()
}

fn table_with(loader: impl OptionLoader + 'static) -> DataTable<Alert> {
    let config = config(Mode::Local).filter(FilterDescriptor::searchable("owner", "Owner", owner, loader));
    DataTable::new(config).unwrap()
}

#[tokio::test]
async fn test_load_options() {
    let mut table = table_with(Owners { delay: Duration::ZERO });
    assert_eq!(table.options_state("owner"), Some(&OptionsState::Idle));

    table.load_options("owner").await.unwrap();

    assert_eq!(table.options("owner").len(), 3);
    assert!(table.options_state("owner").unwrap().is_ready());
}

#[tokio::test]
async fn test_failed_load_yields_empty_options() {
    let mut table = table_with(Broken);
    table.load_options("owner").await.unwrap();

    assert_eq!(table.options_state("owner"), Some(&OptionsState::Ready(Vec::new())));
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let mut table = table_with(Owners { delay: Duration::from_millis(5) });

    let (first, loader) = table.begin_option_load("owner").unwrap();
    let (second, _) = table.begin_option_load("owner").unwrap();
    assert!(table.options_state("owner").unwrap().is_loading());

    let slow = loader.load().await;
    assert!(!table.finish_option_load(&first, slow));
    assert!(table.options_state("owner").unwrap().is_loading());

    let fresh = vec![FilterOption::from_value("Payments")];
    assert!(table.finish_option_load(&second, Ok(fresh)));
    assert_eq!(table.options("owner")[0].value, "Payments");
}

#[tokio::test]
async fn test_concurrent_loads_keep_latest() {
    let mut table = table_with(Owners { delay: Duration::from_millis(1) });

    let (first, first_loader) = table.begin_option_load("owner").unwrap();
    let (second, second_loader) = table.begin_option_load("owner").unwrap();
    let (a, b) = tokio::join!(first_loader.load(), second_loader.load());

    assert!(table.finish_option_load(&second, b));
    assert!(!table.finish_option_load(&first, a));
    assert_eq!(table.options("owner").len(), 3);
}

#[tokio::test]
async fn test_search_options_ranks_by_label() {
    let mut table = table_with(Owners { delay: Duration::ZERO });
    table.load_options("owner").await.unwrap();

    let all = table.search_options("owner", "").unwrap();
    assert_eq!(all.len(), 3);

    let labels: Vec<&str> = table
        .search_options("owner", "PLAT")
        .unwrap()
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(labels.len(), 2);
    assert!(labels.contains(&"Platform Team"));
    assert!(labels.contains(&"Data Platform"));
}

#[test]
fn test_load_errors() {
    let mut table = table_with(Broken);
    assert!(matches!(
        table.begin_option_load("missing").err(),
        Some(TableError::UnknownFilter { .. })
    ));
    assert!(matches!(
        table.begin_option_load("name").err(),
        Some(TableError::NoOptionLoader { .. })
    ));
}
