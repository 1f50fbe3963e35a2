//! Filter descriptors and option sources.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::options::OptionLoader;
use super::transform::ValueTransform;
use super::value::FilterKind;
use crate::column::Accessor;
use crate::error::TableError;
use crate::model::Value;

/// An option of a choice filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// The value matched against cells and submitted as the parameter.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Creates an option with a distinct label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates an option labelled with its own value.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Where a choice filter gets its options from.
#[derive(Clone, Default)]
pub enum OptionSource {
    /// No options (non-choice kinds).
    #[default]
    None,
    /// A fixed option list.
    Static(Vec<FilterOption>),
    /// Options loaded asynchronously.
    Dynamic(Arc<dyn OptionLoader>),
}

impl fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::None => write!(f, "None"),
            OptionSource::Static(options) => f.debug_tuple("Static").field(options).finish(),
            OptionSource::Dynamic(_) => write!(f, "Dynamic(..)"),
        }
    }
}

/// Declares a filter on a table.
///
/// # Example
///
/// ```
/// use datatable_lib::filter::{FilterDescriptor, FilterOption};
///
/// struct Alert {
///     name: String,
///     severity: String,
/// }
///
/// let filters: Vec<FilterDescriptor<Alert>> = vec![
///     FilterDescriptor::text("name", "Name", |a: &Alert| a.name.as_str().into()),
///     FilterDescriptor::multi_choice("severity", "Severity", |a: &Alert| a.severity.as_str().into())
///         .options(["critical", "warning", "info"].map(FilterOption::from_value)),
/// ];
/// ```
pub struct FilterDescriptor<R> {
    field: String,
    label: String,
    kind: FilterKind,
    accessor: Accessor<R>,
    options: OptionSource,
    transform: Option<ValueTransform>,
}

impl<R> FilterDescriptor<R> {
    /// Creates a filter of the given kind.
    pub fn new(
        field: impl Into<String>,
        label: impl Into<String>,
        kind: FilterKind,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            kind,
            accessor: Arc::new(accessor),
            options: OptionSource::None,
            transform: None,
        }
    }

    /// Creates a free-text filter.
    pub fn text(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::Text, accessor)
    }

    /// Creates a single choice filter. Supply options with [`options`](Self::options)
    /// or [`loader`](Self::loader).
    pub fn single_choice(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::SingleChoice, accessor)
    }

    /// Creates a multi choice filter.
    pub fn multi_choice(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::MultiChoice, accessor)
    }

    /// Creates a searchable single choice filter backed by an option loader.
    pub fn searchable(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
        loader: impl OptionLoader + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::SearchableSingleChoice, accessor).loader(loader)
    }

    /// Creates a numeric range filter.
    pub fn range(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::Range, accessor)
    }

    /// Creates a date range filter.
    ///
    /// Defaults to [`ValueTransform::WholeDayRange`].
    pub fn date_range(
        field: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, label, FilterKind::DateRange, accessor).transform(ValueTransform::WholeDayRange)
    }

    /// Sets a fixed option list.
    pub fn options(mut self, options: impl IntoIterator<Item = FilterOption>) -> Self {
        self.options = OptionSource::Static(options.into_iter().collect());
        self
    }

    /// Sets an asynchronous option loader.
    pub fn loader(mut self, loader: impl OptionLoader + 'static) -> Self {
        self.options = OptionSource::Dynamic(Arc::new(loader));
        self
    }

    /// Sets the option source.
    pub fn option_source(mut self, source: OptionSource) -> Self {
        self.options = source;
        self
    }

    /// Sets the value transform used in server-delegated mode.
    pub fn transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Removes the value transform.
    pub fn without_transform(mut self) -> Self {
        self.transform = None;
        self
    }

    /// Returns the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the filter kind.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Returns the option source.
    pub fn source(&self) -> &OptionSource {
        &self.options
    }

    /// Returns the value transform.
    pub fn value_transform(&self) -> Option<&ValueTransform> {
        self.transform.as_ref()
    }

    /// Read the filtered value for a row.
    pub fn value(&self, row: &R) -> Value {
        (self.accessor)(row)
    }

    /// Checks that choice kinds have an option source.
    pub(crate) fn validate(&self) -> Result<(), TableError> {
        if self.kind.has_options() && matches!(self.options, OptionSource::None) {
            return Err(TableError::MissingOptions {
                field: self.field.clone(),
            });
        }
        Ok(())
    }
}

impl<R> Clone for FilterDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            label: self.label.clone(),
            kind: self.kind,
            accessor: Arc::clone(&self.accessor),
            options: self.options.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<R> fmt::Debug for FilterDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDescriptor")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alert {
        severity: String,
    }

    #[test]
    fn test_choice_filter_requires_options() {
        let missing = FilterDescriptor::single_choice("severity", "Severity", |a: &Alert| {
            a.severity.as_str().into()
        });
        assert_eq!(
            missing.validate(),
            Err(TableError::MissingOptions {
                field: "severity".to_string()
            })
        );

        let with_options = missing.options([FilterOption::from_value("critical")]);
        assert!(with_options.validate().is_ok());
    }

    #[test]
    fn test_date_range_defaults_to_whole_days() {
        let filter = FilterDescriptor::date_range("created_at", "Created", |_: &Alert| Value::Null);
        assert!(matches!(filter.value_transform(), Some(ValueTransform::WholeDayRange)));
        assert!(filter.without_transform().value_transform().is_none());
    }

    #[test]
    fn test_option_from_value() {
        let option = FilterOption::from_value("warning");
        assert_eq!(option.value, "warning");
        assert_eq!(option.label, "warning");
    }
}
