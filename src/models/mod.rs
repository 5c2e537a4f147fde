//! Domain models shared by the store, services and HTTP layer.

mod pagination;
mod role;
mod user;

pub use pagination::{
    MAX_PAGE_LIMIT, Pagination, PaginationLinks, PaginationMeta, PaginationOptions,
};
pub use role::UserRole;
pub use user::{NewUser, UpdateUser, User, UserFilter};
