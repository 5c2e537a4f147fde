//! Database access: async connection pool and embedded migrations.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, MigrationRunner};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
