//! User service for business logic operations.
//!
//! Provides a higher-level API for user operations, encapsulating
//! business rules and coordinating with the repository layer.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewUser, Pagination, PaginationOptions, UpdateUser, User, UserFilter, UserRole,
};
use crate::repositories::UserStore;
use crate::utils::password::hash_password;

/// User service for handling user-related business logic.
///
/// Holds the store behind an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Registers a user.
    ///
    /// The password (if any) is replaced by its argon2 hash and the role is
    /// always `user`, whatever the caller put in `new_user`.
    pub async fn create(&self, mut new_user: NewUser) -> AppResult<User> {
        new_user.password = new_user.password.as_deref().map(hash_password).transpose()?;
        new_user.role = UserRole::User;

        let user = self.store.insert(new_user).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Gets a user by id, `NotFound` when absent.
    pub async fn find_one(&self, id: i32) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.store.find_by_email(email).await
    }

    /// One page over all users, ordered by id.
    pub async fn paginate(&self, options: &PaginationOptions) -> AppResult<Pagination<User>> {
        self.page(&UserFilter::default(), options).await
    }

    /// One page over users whose username contains `username`.
    pub async fn paginate_filter_by_username(
        &self,
        options: &PaginationOptions,
        username: &str,
    ) -> AppResult<Pagination<User>> {
        let filter = UserFilter {
            username: Some(username.to_string()),
        };
        self.page(&filter, options).await
    }

    async fn page(
        &self,
        filter: &UserFilter,
        options: &PaginationOptions,
    ) -> AppResult<Pagination<User>> {
        let (items, total) = self
            .store
            .page(filter, options.offset(), options.limit())
            .await?;
        Ok(Pagination::new(items, total, options))
    }

    /// Overwrites the supplied profile fields.
    ///
    /// The role is never changed here; an empty changeset returns the
    /// current record.
    pub async fn update_one(&self, id: i32, mut changes: UpdateUser) -> AppResult<User> {
        changes.role = None;
        changes.password = changes.password.as_deref().map(hash_password).transpose()?;

        if changes.is_empty() {
            return self.find_one(id).await;
        }

        let user = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Changes only the role of a user.
    pub async fn update_role_of_user(&self, id: i32, role: UserRole) -> AppResult<User> {
        let user = self
            .store
            .update(id, UpdateUser::role_only(role))
            .await?
            .ok_or_else(|| AppError::user_not_found(id))?;
        tracing::info!(user_id = user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    /// Hard-deletes a user and returns the removed record.
    pub async fn delete_one(&self, id: i32) -> AppResult<User> {
        let user = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))?;
        tracing::info!(user_id = user.id, "User deleted");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryUserRepository;
    use crate::utils::password::verify_password;

    const ROUTE: &str = "http://localhost:3000/users";

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepository::new()))
    }

    fn draft(username: &str) -> NewUser {
        NewUser {
            name: Some(username.to_string()),
            username: Some(username.to_string()),
            email: Some(format!("{}@example.com", username)),
            password: Some("secret-password".to_string()),
            role: UserRole::Admin,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password_and_forces_user_role() {
        let service = service();
        let user = service.create(draft("ada")).await.unwrap();

        assert_eq!(user.role, UserRole::User);
        let hash = user.password.unwrap();
        assert_ne!(hash, "secret-password");
        assert!(verify_password("secret-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_find_one_missing_is_not_found() {
        let result = service().find_one(404).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_one_ignores_role_and_rehashes() {
        let service = service();
        let user = service.create(draft("ada")).await.unwrap();

        let updated = service
            .update_one(
                user.id,
                UpdateUser {
                    name: Some("Ada L.".to_string()),
                    password: Some("new-password".to_string()),
                    role: Some(UserRole::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Ada L."));
        assert_eq!(updated.role, UserRole::User);
        assert!(verify_password("new-password", updated.password.as_deref().unwrap()).unwrap());
    }

    #[tokio::test]
    async fn test_update_one_empty_changes_returns_current() {
        let service = service();
        let user = service.create(draft("ada")).await.unwrap();

        let same = service.update_one(user.id, UpdateUser::default()).await.unwrap();
        assert_eq!(same, user);

        let missing = service.update_one(99, UpdateUser::default()).await;
        assert!(matches!(missing, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_role_changes_only_role() {
        let service = service();
        let user = service.create(draft("ada")).await.unwrap();

        let promoted = service
            .update_role_of_user(user.id, UserRole::ChiefEditor)
            .await
            .unwrap();

        assert_eq!(promoted.role, UserRole::ChiefEditor);
        assert_eq!(
            User {
                role: UserRole::User,
                ..promoted
            },
            user
        );
    }

    #[tokio::test]
    async fn test_delete_one_twice_is_not_found() {
        let service = service();
        let user = service.create(draft("ada")).await.unwrap();

        assert_eq!(service.delete_one(user.id).await.unwrap().id, user.id);
        assert!(matches!(
            service.delete_one(user.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_paginate_and_filter() {
        let service = service();
        for name in ["alice", "bob", "carol", "alina"] {
            service.create(draft(name)).await.unwrap();
        }

        let page = service
            .paginate(&PaginationOptions::new(2, 3, ROUTE))
            .await
            .unwrap();
        assert_eq!(page.meta.total_items, 4);
        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].username.as_deref(), Some("alina"));

        let filtered = service
            .paginate_filter_by_username(&PaginationOptions::new(1, 10, ROUTE), "ali")
            .await
            .unwrap();
        assert_eq!(filtered.meta.total_items, 2);
        assert!(filtered.links.next.is_none());
    }
}
