//! CLI settings, read from `settings.json` in the config directory.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use datatable_lib::TableSettings;
use log::LevelFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;
use crate::paths;

/// Settings file contents. Every field is optional.
///
/// ```json
/// {
///   "log_level": "debug",
///   "table": { "page_size": 25, "density": "compact" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Defaults for every table opened by the CLI.
    pub table: TableSettings,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            table: TableSettings::default(),
        }
    }
}

impl CliSettings {
    /// Loads settings from the platform config directory, or defaults if
    /// there is no settings file.
    pub fn load() -> Result<Self, CliError> {
        match paths::settings_file() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads settings from a file.
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parses the log level.
    pub fn level(&self) -> Result<LevelFilter, CliError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| CliError::LogLevel(self.log_level.clone()))
    }
}
