//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod user_service;

pub use auth_service::AuthService;
pub use user_service::UserService;

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the store sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub auth: AuthService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, jwt: JwtConfig) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            auth: AuthService::new(repos.users, jwt),
        }
    }
}
