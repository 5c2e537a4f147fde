//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::repositories::{Repositories, UserStore};
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services and the store sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the user store, for guards and health checks
    pub store: Arc<dyn UserStore>,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
    /// Absolute base route used in pagination links
    pub users_route: String,
}

impl AppState {
    /// Wires services on top of `repos`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(
    ///     Repositories::new(pool),
    ///     settings.jwt.clone(),
    ///     settings.server.users_route(),
    /// );
    /// ```
    pub fn new(repos: Repositories, jwt_config: JwtConfig, users_route: impl Into<String>) -> Self {
        let store = repos.users.clone();
        let services = Services::new(repos, jwt_config.clone());
        Self {
            services,
            store,
            jwt_config,
            users_route: users_route.into(),
        }
    }
}
