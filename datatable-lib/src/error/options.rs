//! OptionLoadError for asynchronous filter option loading

/// Error returned by an [`OptionLoader`](crate::filter::OptionLoader).
///
/// The table never propagates this error: a failed load is logged and the
/// filter falls back to an empty option list.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load options: {message}")]
pub struct OptionLoadError {
    /// Human-readable error message.
    pub message: String,
}

impl OptionLoadError {
    /// Creates a new option load error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for OptionLoadError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for OptionLoadError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
