//! Headless tabular data engine
//!
//! A UI-framework-agnostic engine behind list views: declarative columns and
//! filters, multi-column sorting, and pagination. Runs either in local mode
//! (filter, sort and paginate an in-memory row set) or in server-delegated
//! mode (track UI intent and relay it to the caller, which supplies the rows).

pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod page;
pub mod sort;
pub mod table;

pub use column::Alignment;
pub use column::Column;
pub use column::ColumnWidth;
pub use config::Density;
pub use config::EmptyState;
pub use config::Mode;
pub use config::TableConfig;
pub use config::TableSettings;
pub use error::OptionLoadError;
pub use error::TableError;
pub use model::TableRow;
pub use model::Value;
pub use page::PageInfo;
pub use page::ServerPage;
pub use sort::Direction;
pub use sort::SortDescriptor;
pub use table::DataTable;
pub use table::HeaderCell;
pub use table::TableView;
pub use table::ViewState;
