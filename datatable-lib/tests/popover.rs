//! Filter popover flows driven through the table.

mod common;

use common::{Alert, alerts, config, ids};
use datatable_lib::filter::{FilterValue, FilterValues, PopoverState};
use datatable_lib::{DataTable, Mode, TableError};

fn table() -> DataTable<Alert> {
    let mut table = DataTable::new(config(Mode::Local)).unwrap();
    table.set_rows(alerts());
    table
        .apply_filters(FilterValues::new().with("severity", FilterValue::choices(["warning"])))
        .unwrap();
    table
}

#[test]
fn test_open_copies_applied_into_draft() {
    let mut table = table();
    assert!(!table.is_filter_open());

    table.open_filters();
    assert_eq!(table.draft_filters(), Some(table.applied_filters()));
}

#[test]
fn test_apply_draft() {
    let mut table = table();
    table.open_filters();
    table.set_draft("name", FilterValue::text("disk")).unwrap();

    // Draft edits do not touch the rows until applied
    assert_eq!(ids(table.view().rows), vec![2, 3]);

    table.apply_draft().unwrap();
    assert!(!table.is_filter_open());
    assert_eq!(ids(table.view().rows), vec![3]);
}

#[test]
fn test_cancel_reverts() {
    let mut table = table();
    let before = table.applied_filters().clone();

    table.open_filters();
    table.set_draft("severity", FilterValue::choices(["info"])).unwrap();
    table.cancel_draft();

    assert_eq!(table.popover().state(), &PopoverState::Closed);
    assert_eq!(table.applied_filters(), &before);

    // Reopening starts from the applied values, not the discarded draft
    table.open_filters();
    assert_eq!(table.draft_filters(), Some(&before));
}

#[test]
fn test_clear_blanks_draft_and_stays_open() {
    let mut table = table();
    table.open_filters();
    table.clear_draft().unwrap();

    assert!(table.is_filter_open());
    assert!(table.draft_filters().unwrap().is_empty());
    assert_eq!(ids(table.view().rows), vec![2, 3]);

    table.apply_draft().unwrap();
    assert_eq!(ids(table.view().rows), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_draft_requires_open_popover() {
    let mut table = table();
    assert_eq!(
        table.set_draft("name", FilterValue::text("disk")),
        Err(TableError::PopoverClosed)
    );
    assert_eq!(table.apply_draft(), Err(TableError::PopoverClosed));
}

#[test]
fn test_draft_validates_kind() {
    let mut table = table();
    table.open_filters();
    assert_eq!(
        table.set_draft("count", FilterValue::text("4")),
        Err(TableError::kind_mismatch("count", "range", "text"))
    );
    assert_eq!(
        table.set_draft("owner", FilterValue::text("ops")),
        Err(TableError::unknown_filter("owner"))
    );
}
