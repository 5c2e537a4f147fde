//! Configuration validation logic
//!
//! Range and format checks for every configuration section. `Settings::validate`
//! reports the first failing field.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, ServerConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Minimum HS256 secret length accepted
const MIN_JWT_SECRET_LEN: usize = 32;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Public URL must be an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if !(self.public_url.starts_with("http://") || self.public_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "server.public_url".to_string(),
                message: format!(
                    "Public URL '{}' must start with http:// or https://",
                    self.public_url
                ),
            });
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a PostgreSQL connection string
    /// - Min and max connections must be greater than 0, min ≤ max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl JwtConfig {
    /// Validate JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: format!(
                    "JWT secret should be at least {} characters for security",
                    MIN_JWT_SECRET_LEN
                ),
            });
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be positive",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// A plain level must be one of trace, debug, info, warn, error; anything
    /// containing `=` or `,` is treated as an `EnvFilter` directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let is_directive = self.level.contains('=') || self.level.contains(',');
        if !is_directive && !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/blog".to_string();
        settings.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_settings_valid() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert_field(settings.validate(), "server.port");
    }

    #[test]
    fn test_server_config_invalid_request_timeout() {
        let mut settings = valid_settings();
        settings.server.request_timeout = 0;
        assert_field(settings.validate(), "server.request_timeout");
    }

    #[test]
    fn test_server_config_invalid_public_url() {
        let mut settings = valid_settings();
        settings.server.public_url = "localhost:3000".to_string();
        assert_field(settings.validate(), "server.public_url");
    }

    #[test]
    fn test_database_config_empty_url() {
        let mut settings = valid_settings();
        settings.database.url = String::new();
        assert_field(settings.validate(), "database.url");
    }

    #[test]
    fn test_database_config_rejects_non_postgres_url() {
        let mut settings = valid_settings();
        settings.database.url = "mysql://localhost/blog".to_string();
        assert_field(settings.validate(), "database.url");

        settings.database.url = "postgresql://user:pw@db:5432/blog".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_database_config_min_exceeds_max() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert_field(settings.validate(), "database.min_connections");
    }

    #[test]
    fn test_jwt_config_short_secret() {
        let mut settings = valid_settings();
        settings.jwt.secret = "short".to_string();
        assert_field(settings.validate(), "jwt.secret");
    }

    #[test]
    fn test_jwt_config_non_positive_expiration() {
        let mut settings = valid_settings();
        settings.jwt.access_token_expiration = 0;
        assert_field(settings.validate(), "jwt.access_token_expiration");
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert_field(settings.validate(), "logger.level");
    }

    #[test]
    fn test_logger_settings_accepts_filter_directive() {
        let mut settings = valid_settings();
        settings.logger.level = "info,blog_rs=debug".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_logger_settings_file_enabled_empty_path() {
        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();
        assert_field(settings.validate(), "logger.file.path");
    }

    #[test]
    fn test_logger_settings_no_output() {
        let mut settings = valid_settings();
        settings.logger.console.enabled = false;
        settings.logger.file.enabled = false;
        assert_field(settings.validate(), "logger");
    }
}
