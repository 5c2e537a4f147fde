//! Page-based listing: request options and the page object returned to clients.

use serde::Serialize;
use utoipa::ToSchema;

/// Hard ceiling on the page size accepted from clients.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Page request with the base route used to build navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    /// 1-based page number
    pub page: u32,
    /// Page size, already clamped to `MAX_PAGE_LIMIT`
    pub limit: u32,
    /// Absolute route the links point at, e.g. `http://localhost:3000/users`
    pub route: String,
}

impl PaginationOptions {
    pub fn new(page: u32, limit: u32, route: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            route: route.into(),
        }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// A single page of results.
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
    pub links: PaginationLinks,
}

/// Counters describing the page and the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Number of items on this page
    #[schema(example = 10)]
    pub item_count: u32,
    /// Number of items across all pages
    #[schema(example = 42)]
    pub total_items: u64,
    #[schema(example = 10)]
    pub items_per_page: u32,
    #[schema(example = 5)]
    pub total_pages: u32,
    #[schema(example = 1)]
    pub current_page: u32,
}

/// Navigation links; absent when the target page does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationLinks {
    #[schema(example = "http://localhost:3000/users?limit=10")]
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "http://localhost:3000/users?page=2&limit=10")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "http://localhost:3000/users?page=5&limit=10")]
    pub last: Option<String>,
}

impl<T> Pagination<T> {
    /// Builds the page object from one page of items and the total count.
    pub fn new(items: Vec<T>, total_items: u64, options: &PaginationOptions) -> Self {
        let limit = options.limit.max(1);
        let total_pages = total_items.div_ceil(limit as u64) as u32;
        let page = options.page;
        let link = |target: u32| format!("{}?page={}&limit={}", options.route, target, limit);

        let links = PaginationLinks {
            first: format!("{}?limit={}", options.route, limit),
            previous: (page > 1).then(|| link(page - 1)),
            next: (page < total_pages).then(|| link(page + 1)),
            last: (total_pages > 0).then(|| link(total_pages)),
        };

        Self {
            meta: PaginationMeta {
                item_count: items.len() as u32,
                total_items,
                items_per_page: limit,
                total_pages,
                current_page: page,
            },
            links,
            items,
        }
    }

    /// Converts the items while keeping meta and links.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Pagination<U> {
        Pagination {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
            links: self.links,
        }
    }
}
