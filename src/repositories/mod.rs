//! Repository layer for data access operations.
//!
//! `UserStore` is the seam between services and storage; `UserRepository`
//! talks to PostgreSQL, `MemoryUserRepository` keeps rows in process.

mod memory_user_repo;
mod user_repo;
mod user_store;

pub use memory_user_repo::MemoryUserRepository;
pub use user_repo::UserRepository;
pub use user_store::UserStore;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self::with_store(Arc::new(UserRepository::new(pool)))
    }

    /// Repositories backed by the in-process store.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryUserRepository::new()))
    }

    pub fn with_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
