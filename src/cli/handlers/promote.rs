//! Promote command handler
//!
//! Changes the role of an existing user without going through the API.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};
use crate::repositories::{Repositories, UserStore};
use crate::services::UserService;

/// Handler for the promote command
pub struct PromoteCommandHandler {
    users: UserService,
}

impl PromoteCommandHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }

    /// Connects to the configured database.
    pub async fn connect(config: &Settings) -> AppResult<Self> {
        config.database.validate()?;
        let pool = establish_async_connection_pool(&config.database).await?;
        Ok(Self::new(Repositories::new(pool).users))
    }

    /// Sets `role` on the user registered with `email`.
    ///
    /// # Errors
    /// - `NotFound` when no user has that email
    /// - Database errors
    pub async fn execute(&self, email: &str, role: UserRole) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            })?;

        let previous = user.role;
        let updated = self.users.update_role_of_user(user.id, role).await?;

        tracing::info!(
            user_id = updated.id,
            from = %previous,
            to = %updated.role,
            "User role changed"
        );
        println!(
            "✓ {} (id {}) is now {} (was {})",
            email, updated.id, updated.role, previous
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repositories::MemoryUserRepository;

    async fn handler_with_user(email: &str) -> (PromoteCommandHandler, User) {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserRepository::new());
        let user = UserService::new(store.clone())
            .create(NewUser {
                name: Some("Grace".to_string()),
                username: Some("grace".to_string()),
                email: Some(email.to_string()),
                password: Some("correct horse".to_string()),
                role: UserRole::User,
            })
            .await
            .unwrap();
        (PromoteCommandHandler::new(store), user)
    }

    #[tokio::test]
    async fn test_promote_existing_user() {
        let (handler, user) = handler_with_user("grace@example.com").await;

        let promoted = handler
            .execute("grace@example.com", UserRole::Admin)
            .await
            .unwrap();

        assert_eq!(promoted.id, user.id);
        assert_eq!(promoted.role, UserRole::Admin);
        assert_eq!(promoted.username, user.username);
        assert_eq!(promoted.password, user.password);
    }

    #[tokio::test]
    async fn test_promote_unknown_email() {
        let (handler, _) = handler_with_user("grace@example.com").await;

        match handler.execute("nobody@example.com", UserRole::Admin).await {
            Err(AppError::NotFound { field, value, .. }) => {
                assert_eq!(field, "email");
                assert_eq!(value, "nobody@example.com");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_database_url() {
        let config = Settings::default();
        assert!(PromoteCommandHandler::connect(&config).await.is_err());
    }
}
