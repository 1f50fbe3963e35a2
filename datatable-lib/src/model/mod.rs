//! Row and cell value types.

mod row;
mod value;

pub use row::TableRow;
pub use value::Value;
