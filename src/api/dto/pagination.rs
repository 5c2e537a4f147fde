//! Pagination-related DTOs for API requests.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::models::PaginationOptions;

/// Query parameters of the user index.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct IndexQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u32,

    /// Number of items per page; values above 100 are clamped to 100
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    #[param(minimum = 1, example = 10)]
    pub limit: u32,

    /// Only users whose username contains this text
    #[param(example = "ada")]
    pub username: Option<String>,
}

impl IndexQuery {
    /// Page options with links rooted at `route`.
    pub fn options(&self, route: &str) -> PaginationOptions {
        PaginationOptions::new(self.page, self.limit, route)
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}
