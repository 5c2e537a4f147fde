//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server until shutdown, or only validates with `dry_run`.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Server::new(self.config).run().await
        }
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Pagination links use: {}", self.config.server.users_route());
        println!(
            "✓ Access tokens expire after {} hour(s)",
            self.config.jwt.access_token_expiration
        );
        if self.config.database.auto_migrate {
            println!("✓ Pending migrations will be applied at startup");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
