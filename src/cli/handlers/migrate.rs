//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::Settings;
use crate::db::MigrationRunner;
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Arguments
    /// * `dry_run` - If true, lists pending migrations without applying them
    /// * `rollback` - Optional number of migrations to revert
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let runner = MigrationRunner::new(self.config.database.url.clone());

        if dry_run {
            return Self::show_pending(&runner).await;
        }

        match rollback {
            Some(steps) => Self::rollback(&runner, steps).await,
            None => Self::apply(&runner).await,
        }
    }

    async fn show_pending(runner: &MigrationRunner) -> AppResult<()> {
        println!("Checking for pending migrations...");
        let pending = runner.pending().await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }
        Ok(())
    }

    async fn apply(runner: &MigrationRunner) -> AppResult<()> {
        println!("Running database migrations...");
        let applied = runner.run_pending().await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }
        tracing::info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    async fn rollback(runner: &MigrationRunner, steps: u32) -> AppResult<()> {
        println!("Rolling back {} migration(s)...", steps);
        let reverted = runner.revert(steps).await?;

        for version in &reverted {
            println!("  - reverted {}", version);
        }
        println!("✓ Rolled back {} migration(s)", reverted.len());
        tracing::warn!(count = reverted.len(), "Migrations reverted");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
