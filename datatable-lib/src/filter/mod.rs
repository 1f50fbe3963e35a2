//! Filter descriptors, values and the filter popover.
//!
//! # Types
//!
//! - [`FilterDescriptor`] - Declares a filter: field, kind, accessor, options, transform
//! - [`FilterValue`] - A picked value, one variant per [`FilterKind`]
//! - [`FilterValues`] - The filter value store (applied or draft)
//! - [`ValueTransform`] - Turns a picked value into query parameters
//! - [`QueryParams`] - Flat query parameters forwarded in server-delegated mode
//! - [`FilterPopover`] - Open/closed state holding the draft values
//! - [`OptionLoader`] - Asynchronous option source for choice filters

mod descriptor;
mod options;
mod popover;
mod query;
mod store;
mod transform;
mod value;

pub use descriptor::FilterDescriptor;
pub use descriptor::FilterOption;
pub use descriptor::OptionSource;
pub use options::LoadTicket;
pub use options::OptionLoader;
pub use options::OptionsState;
pub use options::fuzzy_rank;
pub(crate) use options::OptionSet;
pub use popover::FilterPopover;
pub use popover::PopoverState;
pub use query::QueryParams;
pub use store::FilterValues;
pub use transform::ValueTransform;
pub(crate) use transform::raw_params;
pub use transform::end_of_day;
pub use transform::format_timestamp;
pub use transform::start_of_day;
pub use value::FilterKind;
pub use value::FilterValue;
