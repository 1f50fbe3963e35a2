//! TableRow trait

use std::fmt::Display;
use std::hash::Hash;

/// Trait for records that can be displayed as rows of a [`DataTable`](crate::DataTable).
///
/// The only shape requirement is a unique key. Cell values are read through
/// the accessors declared on columns and filters, so the row type itself can
/// be any struct.
///
/// # Example
///
/// ```
/// use datatable_lib::TableRow;
///
/// struct Alert {
///     id: u64,
///     name: String,
/// }
///
/// impl TableRow for Alert {
///     type Key = u64;
///
///     fn key(&self) -> u64 {
///         self.id
///     }
/// }
/// ```
pub trait TableRow {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + Display;

    /// Return the unique key for this row.
    fn key(&self) -> Self::Key;
}
