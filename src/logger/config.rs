//! Runtime configuration types for the logger

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Main logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Level name or `EnvFilter` directive string
    pub level: String,
}

impl LoggerConfig {
    /// Create a new logger configuration with validation
    pub fn new(
        console: ConsoleConfig,
        file: FileConfig,
        level: String,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.filter()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    /// Builds the `EnvFilter` for the configured level.
    pub fn filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            LoggerError::config(format!("Invalid log level '{}': {}", self.level, e))
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors; only honored when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(enabled: bool, path: PathBuf, append: bool, format: LogFormat) -> Self {
        Self {
            enabled,
            path,
            append,
            format,
        }
    }

    /// Pure check; the writer creates missing directories.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.enabled && self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/app.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

/// Log line layout for file output
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_filter_directives_accepted() {
        for level in ["trace", "WARN", "info,blog_rs=debug", "tower_http=debug"] {
            let config = LoggerConfig {
                level: level.to_string(),
                ..LoggerConfig::default()
            };
            assert!(config.validate().is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let result = LoggerConfig::new(
            ConsoleConfig::default(),
            FileConfig::default(),
            "blog_rs=loud".to_string(),
        );
        assert!(matches!(result, Err(LoggerError::Config { .. })));
    }

    #[test]
    fn test_both_outputs_disabled() {
        let result = LoggerConfig::new(
            ConsoleConfig::new(false, false),
            FileConfig::default(),
            "info".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let file = FileConfig::new(true, PathBuf::new(), true, LogFormat::Json);
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap().as_str(), "compact");
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
