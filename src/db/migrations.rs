//! Embedded diesel migrations.
//!
//! `MigrationHarness` is synchronous, so every operation opens a blocking
//! `PgConnection` on the tokio blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies, lists and reverts the embedded migrations against one database.
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    database_url: String,
}

impl MigrationRunner {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Names of migrations not yet applied.
    pub async fn pending(&self) -> AppResult<Vec<String>> {
        self.with_connection("check pending migrations", |conn| {
            conn.pending_migrations(MIGRATIONS)
                .map(|pending| pending.iter().map(|m| m.name().to_string()).collect())
        })
        .await
    }

    /// Applies every pending migration and returns the applied versions.
    pub async fn run_pending(&self) -> AppResult<Vec<String>> {
        self.with_connection("run pending migrations", |conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|applied| applied.iter().map(|v| v.to_string()).collect())
        })
        .await
    }

    /// Reverts the last `steps` migrations.
    pub async fn revert(&self, steps: u32) -> AppResult<Vec<String>> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        let applied = self
            .with_connection("get applied migrations", |conn| conn.applied_migrations())
            .await?;
        if applied.len() < steps as usize {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: format!(
                    "Cannot rollback {} migrations - only {} applied migrations available",
                    steps,
                    applied.len()
                ),
            });
        }

        self.with_connection("revert migration", move |conn| {
            let mut reverted = Vec::with_capacity(steps as usize);
            for _ in 0..steps {
                reverted.push(conn.revert_last_migration(MIGRATIONS)?.to_string());
            }
            Ok(reverted)
        })
        .await
    }

    async fn with_connection<T, F>(&self, operation: &'static str, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(
                &mut PgConnection,
            ) -> Result<T, Box<dyn std::error::Error + Send + Sync + 'static>>
            + Send
            + 'static,
    {
        let database_url = self.database_url.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::anyhow!("Connection error: {}", e),
            })?;

            f(&mut conn).map_err(|e| AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }
}
