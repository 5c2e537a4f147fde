//! In-process user store.
//!
//! Backs the router in tests and local demos where PostgreSQL is not
//! available. Mirrors the table's unique constraints and id ordering.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User, UserFilter};
use crate::repositories::UserStore;

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<BTreeMap<i32, User>>,
    next_id: AtomicI32,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::Internal {
            source: anyhow::anyhow!("user store lock poisoned"),
        }
    }

    /// Rejects a username/email already held by a row other than `except`.
    fn check_unique(
        users: &BTreeMap<i32, User>,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> AppResult<()> {
        for user in users.values().filter(|u| Some(u.id) != except) {
            if let Some(value) = email.filter(|e| user.email.as_deref() == Some(*e)) {
                return Err(duplicate("email", value));
            }
            if let Some(value) = username.filter(|n| user.username.as_deref() == Some(*n)) {
                return Err(duplicate("username", value));
            }
        }
        Ok(())
    }
}

fn duplicate(field: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: "users".to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        Self::check_unique(
            &users,
            new_user.username.as_deref(),
            new_user.email.as_deref(),
            None,
        )?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            name: new_user.name,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn page(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, u64)> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        let matches: Vec<&User> = users
            .values()
            .filter(|u| match filter.username.as_deref() {
                Some(needle) => u.username.as_deref().is_some_and(|n| n.contains(needle)),
                None => true,
            })
            .collect();

        let items = matches
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|u| (*u).clone())
            .collect();

        Ok((items, matches.len() as u64))
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if !users.contains_key(&id) {
            return Ok(None);
        }
        Self::check_unique(
            &users,
            changes.username.as_deref(),
            changes.email.as_deref(),
            Some(id),
        )?;

        Ok(users.get_mut(&id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<Option<User>> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        Ok(users.remove(&id))
    }

    async fn ping(&self) -> AppResult<()> {
        self.users.read().map(|_| ()).map_err(|_| Self::poisoned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            name: Some(username.to_uppercase()),
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some("hash".to_string()),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryUserRepository::new();
        let a = store.insert(new_user("ada", "ada@example.com")).await.unwrap();
        let b = store.insert(new_user("bob", "bob@example.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.find_by_id(2).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email_and_username() {
        let store = MemoryUserRepository::new();
        store.insert(new_user("ada", "ada@example.com")).await.unwrap();

        match store.insert(new_user("other", "ada@example.com")).await {
            Err(AppError::Duplicate { field, .. }) => assert_eq!(field, "email"),
            other => panic!("Expected duplicate email, got {:?}", other),
        }
        match store.insert(new_user("ada", "other@example.com")).await {
            Err(AppError::Duplicate { field, .. }) => assert_eq!(field, "username"),
            other => panic!("Expected duplicate username, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_users_without_email_do_not_collide() {
        let store = MemoryUserRepository::new();
        store.insert(NewUser::default()).await.unwrap();
        assert!(store.insert(NewUser::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_page_filters_by_username_substring() {
        let store = MemoryUserRepository::new();
        for (name, email) in [("alice", "a@x.io"), ("malik", "m@x.io"), ("bob", "b@x.io")] {
            store.insert(new_user(name, email)).await.unwrap();
        }

        let filter = UserFilter {
            username: Some("li".to_string()),
        };
        let (items, total) = store.page(&filter, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        let names: Vec<_> = items.iter().filter_map(|u| u.username.as_deref()).collect();
        assert_eq!(names, vec!["alice", "malik"]);

        let (items, total) = store.page(&UserFilter::default(), 1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items[0].username.as_deref(), Some("malik"));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email_and_checks_others() {
        let store = MemoryUserRepository::new();
        let ada = store.insert(new_user("ada", "ada@example.com")).await.unwrap();
        store.insert(new_user("bob", "bob@example.com")).await.unwrap();

        let same = UpdateUser {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(ada.id, same).await.unwrap().is_some());

        let taken = UpdateUser {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(ada.id, taken).await,
            Err(AppError::Duplicate { .. })
        ));
        assert_eq!(store.update(99, UpdateUser::default()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row_once() {
        let store = MemoryUserRepository::new();
        let ada = store.insert(new_user("ada", "ada@example.com")).await.unwrap();

        assert_eq!(store.delete(ada.id).await.unwrap(), Some(ada.clone()));
        assert_eq!(store.delete(ada.id).await.unwrap(), None);
        assert!(store.find_by_email("ada@example.com").await.unwrap().is_none());
    }
}
