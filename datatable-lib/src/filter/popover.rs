//! Filter popover state.
//!
//! ```text
//! Closed --open--> Open(draft = applied)
//! Open --apply--> Closed   (draft becomes applied)
//! Open --cancel--> Closed  (draft discarded)
//! Open --clear--> Open     (draft blanked; applied untouched until apply)
//! ```
//!
//! Only apply changes the applied values.

use super::store::FilterValues;
use super::value::FilterValue;
use crate::error::TableError;

/// Open/closed state of the filter popover.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PopoverState {
    /// The popover is closed; there is no draft.
    #[default]
    Closed,
    /// The popover is open with a draft copy of the filter values.
    Open { draft: FilterValues },
}

/// The filter popover: holds the draft filter values while open.
///
/// Positioning and rendering belong to the presentation layer; this type
/// only tracks state and the draft payload.
#[derive(Debug, Clone, Default)]
pub struct FilterPopover {
    state: PopoverState,
}

impl FilterPopover {
    /// Creates a closed popover.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &PopoverState {
        &self.state
    }

    /// Returns `true` if the popover is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, PopoverState::Open { .. })
    }

    /// Returns the draft values while open.
    pub fn draft(&self) -> Option<&FilterValues> {
        match &self.state {
            PopoverState::Open { draft } => Some(draft),
            PopoverState::Closed => None,
        }
    }

    /// Opens the popover with a copy of the applied values.
    ///
    /// Opening an already open popover keeps its draft.
    pub fn open(&mut self, applied: &FilterValues) {
        if !self.is_open() {
            self.state = PopoverState::Open {
                draft: applied.clone(),
            };
        }
    }

    /// Sets a draft value.
    pub fn set(&mut self, field: impl Into<String>, value: FilterValue) -> Result<(), TableError> {
        match &mut self.state {
            PopoverState::Open { draft } => {
                draft.set(field, value);
                Ok(())
            }
            PopoverState::Closed => Err(TableError::PopoverClosed),
        }
    }

    /// Closes the popover and returns the draft to be applied.
    pub fn take(&mut self) -> Result<FilterValues, TableError> {
        match std::mem::take(&mut self.state) {
            PopoverState::Open { draft } => Ok(draft),
            PopoverState::Closed => Err(TableError::PopoverClosed),
        }
    }

    /// Discards the draft and closes the popover.
    pub fn cancel(&mut self) {
        self.state = PopoverState::Closed;
    }

    /// Blanks the draft; the popover stays open.
    pub fn clear(&mut self) -> Result<(), TableError> {
        match &mut self.state {
            PopoverState::Open { draft } => {
                draft.clear();
                Ok(())
            }
            PopoverState::Closed => Err(TableError::PopoverClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied() -> FilterValues {
        FilterValues::new().with("name", FilterValue::text("err"))
    }

    #[test]
    fn test_open_copies_applied() {
        let mut popover = FilterPopover::new();
        assert!(popover.draft().is_none());
        popover.open(&applied());
        assert_eq!(popover.draft(), Some(&applied()));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut popover = FilterPopover::new();
        popover.open(&applied());
        popover.set("name", FilterValue::text("warn")).unwrap();
        popover.cancel();
        assert!(!popover.is_open());

        popover.open(&applied());
        assert_eq!(popover.draft(), Some(&applied()));
    }

    #[test]
    fn test_clear_blanks_and_stays_open() {
        let mut popover = FilterPopover::new();
        popover.open(&applied());
        popover.clear().unwrap();
        assert!(popover.is_open());
        assert_eq!(popover.draft(), Some(&FilterValues::new()));
    }

    #[test]
    fn test_take_closes() {
        let mut popover = FilterPopover::new();
        popover.open(&FilterValues::new());
        popover.set("name", FilterValue::text("cpu")).unwrap();
        let draft = popover.take().unwrap();
        assert_eq!(draft.get("name"), Some(&FilterValue::text("cpu")));
        assert_eq!(popover.state(), &PopoverState::Closed);
    }

    #[test]
    fn test_closed_popover_rejects_edits() {
        let mut popover = FilterPopover::new();
        assert_eq!(popover.set("name", FilterValue::text("x")), Err(TableError::PopoverClosed));
        assert_eq!(popover.clear(), Err(TableError::PopoverClosed));
        assert_eq!(popover.take(), Err(TableError::PopoverClosed));
    }
}
