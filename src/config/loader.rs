//! Configuration loader for blog-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "BLOG_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "BLOG_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "BLOG";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `BLOG_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`BLOG_CONFIG_DIR`)
    /// - Specific configuration file (`BLOG_CONFIG_FILE`)
    /// - Application environment (`BLOG_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `BLOG_CONFIG_DIR` and `BLOG_CONFIG_FILE` are set,
    /// as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "BLOG_CONFIG_DIR and BLOG_CONFIG_FILE cannot both be set. \
                 Use BLOG_CONFIG_DIR for layered configuration or \
                 BLOG_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Use a single configuration file instead of the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `BLOG_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources
    ///
    /// If a single configuration file is set, loads only that file.
    /// Otherwise, performs layered loading from the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` is not found (when using layered loading)
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // BLOG_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    /// Environment variables with prefix `BLOG_` are mapped to configuration keys,
    /// `__` separating nested keys (`BLOG_DATABASE__URL` -> `database.url`).
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests below mutate process-wide environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const DEFAULT_TOML: &str = r#"
[application]
name = "test-blog"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000
public_url = "http://localhost:3000"

[database]
url = "postgres://localhost/test"
max_connections = 10
min_connections = 1

[jwt]
secret = "test-secret-test-secret-test-secret!"
access_token_expiration = 1

[logger]
level = "info"

[logger.console]
enabled = true
colored = false
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in [CONFIG_DIR_ENV, CONFIG_FILE_ENV, AppEnvironment::ENV_VAR] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("BLOG_CONFIG_DIR"));
                assert!(msg.contains("BLOG_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-blog");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.url, "postgres://localhost/test");
        assert_eq!(settings.server.users_route(), "http://localhost:3000/users");
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            (
                "production.toml",
                "[server]\nhost = \"0.0.0.0\"\nport = 8080\n\n[logger]\nlevel = \"warn\"\n",
            ),
            ("local.toml", "[server]\nport = 9090\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");
        env.set("BLOG_DATABASE__MAX_CONNECTIONS", "42");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.logger.level, "warn");
        assert_eq!(settings.database.max_connections, 42);
    }

    #[test]
    fn test_load_single_file_mode_with_environment_override() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("blog.toml", DEFAULT_TOML)]);

        let loader = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("blog.toml"))
            .with_environment(AppEnvironment::Test);
        let settings = loader.load().expect("Should load settings");

        assert_eq!(loader.environment(), AppEnvironment::Test);
        assert_eq!(settings.application.name, "test-blog");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("BLOG_JWT__SECRET", "short");

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "jwt.secret"),
            other => panic!("Expected jwt.secret validation error, got {:?}", other),
        }
    }
}
