//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::time::Duration;

use anyhow::anyhow;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{MigrationRunner, establish_async_connection_pool};
use crate::error::{AppError, AppResult};
use crate::repositories::Repositories;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Initializes the database connection pool
    /// 3. Applies pending migrations when `database.auto_migrate` is set
    /// 4. Binds to the configured address
    /// 5. Serves requests until Ctrl+C or SIGTERM
    ///
    /// # Errors
    /// - Database connection pool initialization errors
    /// - Migration errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> AppResult<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            public_url = %settings.server.public_url,
            request_timeout = %settings.server.request_timeout,
            "Server configuration loaded"
        );

        // Connection string stays out of the logs.
        tracing::info!(
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        tracing::info!(
            access_token_expiration = %settings.jwt.access_token_expiration,
            "JWT configuration loaded"
        );

        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        if settings.database.auto_migrate {
            let applied = MigrationRunner::new(settings.database.url.clone())
                .run_pending()
                .await?;
            tracing::info!(count = applied.len(), "Pending migrations applied");
        }

        let state = AppState::new(
            Repositories::new(pool),
            settings.jwt.clone(),
            settings.server.users_route(),
        );
        let router = create_router(
            state,
            Duration::from_secs(settings.server.request_timeout),
        );

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            AppError::Internal {
                source: anyhow!("Failed to bind to {}: {}", address, e),
            }
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow!("Server error: {}", e),
            })?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other signal still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
