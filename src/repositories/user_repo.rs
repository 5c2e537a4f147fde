//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::PooledConnection;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, UpdateUser, User, UserFilter};
use crate::repositories::UserStore;
use crate::schema::users;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

type BoxedUsersQuery<'a> = users::BoxedQuery<'a, Pg>;

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> AppResult<PooledConnection<'_, diesel_async::AsyncPgConnection>> {
        self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::anyhow!("{}", e),
        })
    }

    /// Base query for a listing filter; built once for the count and once for the page.
    fn filtered(filter: &UserFilter) -> BoxedUsersQuery<'static> {
        let mut query = users::table.into_boxed();
        if let Some(ref username) = filter.username {
            query = query.filter(users::username.like(format!("%{}%", escape_like(username))));
        }
        query
    }
}

/// Escapes LIKE wildcards so the filter matches the text literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.conn().await?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        let mut conn = self.conn().await?;

        users::table
            .filter(users::id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        let mut conn = self.conn().await?;

        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn page(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut conn = self.conn().await?;

        let total: i64 = Self::filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count users"))?;

        let items = Self::filtered(filter)
            .order(users::id.asc())
            .offset(offset)
            .limit(limit)
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))?;

        Ok((items, total.max(0) as u64))
    }

    async fn update(&self, user_id: i32, changes: UpdateUser) -> AppResult<Option<User>> {
        let mut conn = self.conn().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))
    }

    async fn delete(&self, user_id: i32) -> AppResult<Option<User>> {
        let mut conn = self.conn().await?;

        diesel::delete(users::table.filter(users::id.eq(user_id)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "ping"))
    }
}
