//! Configuration merger for CLI arguments and config files
//!
//! Precedence, lowest first: `config/default.toml`, `config/{env}.toml`,
//! `config/local.toml`, `BLOG_*` variables, then command-line flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies command-line overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honoring `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self::new(Self::loader_for(cli)?.load()?))
    }

    fn loader_for(cli: &Cli) -> Result<ConfigLoader, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path.clone());
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        Ok(loader)
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Command-specific flags win over global ones (`serve --log-level`
    /// over `--verbose`). The result is validated again.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }
            if let Some(port_num) = port {
                config.server.port = *port_num;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the base configuration
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
