//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `auth` - Login request/response
//! - `error` - Common error response DTOs
//! - `health` - Health check responses
//! - `pagination` - Index query parameters

mod auth;
mod error;
mod health;
mod pagination;
mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::IndexQuery;
pub use user::{CreateUserRequest, UpdateRoleRequest, UpdateUserRequest, UserResponse};
