//! Asynchronous option loading and option search.

use async_trait::async_trait;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::descriptor::FilterOption;
use crate::error::OptionLoadError;

/// Loads the option set of a choice filter.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use datatable_lib::OptionLoadError;
/// use datatable_lib::filter::{FilterOption, OptionLoader};
///
/// struct ClusterNodes;
///
/// #[async_trait]
/// impl OptionLoader for ClusterNodes {
///     async fn load(&self) -> Result<Vec<FilterOption>, OptionLoadError> {
///         Ok(vec![FilterOption::from_value("node-1"), FilterOption::from_value("node-2")])
///     }
/// }
/// ```
#[async_trait]
pub trait OptionLoader: Send + Sync {
    /// Fetch the current option list.
    async fn load(&self) -> Result<Vec<FilterOption>, OptionLoadError>;
}

/// Identifies one option load request.
///
/// Only the most recently issued ticket for a field is accepted when the load
/// completes; earlier tickets are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) field: String,
    pub(crate) id: u64,
}

impl LoadTicket {
    /// Returns the filter field this ticket belongs to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the request id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The load state of a filter's options.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OptionsState {
    /// Options have not been requested.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// Options are available (possibly empty after a failed load).
    Ready(Vec<FilterOption>),
}

impl OptionsState {
    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if options are available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the loaded options, or an empty slice.
    pub fn options(&self) -> &[FilterOption] {
        match self {
            Self::Ready(options) => options,
            _ => &[],
        }
    }
}

/// Per-filter option state with a request counter.
#[derive(Debug, Default)]
pub(crate) struct OptionSet {
    state: OptionsState,
    latest: u64,
}

impl OptionSet {
    pub(crate) fn ready(options: Vec<FilterOption>) -> Self {
        Self {
            state: OptionsState::Ready(options),
            latest: 0,
        }
    }

    pub(crate) fn state(&self) -> &OptionsState {
        &self.state
    }

    pub(crate) fn begin(&mut self, field: &str) -> LoadTicket {
        self.latest += 1;
        self.state = OptionsState::Loading;
        LoadTicket {
            field: field.to_string(),
            id: self.latest,
        }
    }

    /// Returns `false` if the ticket is stale and the result was dropped.
    pub(crate) fn finish(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<FilterOption>, OptionLoadError>,
    ) -> bool {
        if ticket.id != self.latest {
            log::debug!(
                "Discarding stale option load for '{}' (request {}, latest {})",
                ticket.field,
                ticket.id,
                self.latest
            );
            return false;
        }
        let options = match result {
            Ok(options) => options,
            Err(e) => {
                log::warn!("Option load for '{}' failed: {}", ticket.field, e);
                Vec::new()
            }
        };
        self.state = OptionsState::Ready(options);
        true
    }
}

/// Ranks options by fuzzy match of their labels against a query.
///
/// Matching ignores case. Results are ordered best match first; options with
/// equal scores keep their original order. An empty query returns every
/// option in order.
pub fn fuzzy_rank<'a>(query: &str, options: &'a [FilterOption]) -> Vec<&'a FilterOption> {
    if query.is_empty() {
        return options.iter().collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut scored: Vec<(u32, &FilterOption)> = options
        .iter()
        .filter_map(|option| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&option.label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (score, option))
        })
        .collect();

    // Stable: equal scores keep option order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, option)| option).collect()
}
