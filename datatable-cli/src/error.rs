//! CLI error type.

use datatable_lib::TableError;
use thiserror::Error;

/// Errors that end a CLI run, or a single command in a session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("invalid log level '{0}'")]
    LogLevel(String),
    #[error("{0}")]
    Usage(String),
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),
    #[error("invalid value '{value}' for {what}")]
    InvalidValue { what: &'static str, value: String },
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn invalid(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            what,
            value: value.into(),
        }
    }
}
