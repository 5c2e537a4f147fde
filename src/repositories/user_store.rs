use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewUser, UpdateUser, User, UserFilter};

/// Storage operations for user records.
///
/// Implementations enforce uniqueness of `username` and `email` and report
/// violations as `AppError::Duplicate`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user and returns it with its assigned id.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// One window of users ordered by id, plus the total number of matches.
    async fn page(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Applies `changes` and returns the updated row, `None` if `id` is unknown.
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Removes the row and returns it, `None` if `id` is unknown.
    async fn delete(&self, id: i32) -> AppResult<Option<User>>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> AppResult<()>;
}
