//! Per-resource operations on [`crate::ApiClient`].
//!
//! Each module adds an `impl` block with the calls one dashboard page
//! needs. All of them route through the executor, so auth attachment,
//! refresh, and error classification behave identically everywhere.

pub mod account;
pub mod analytics;
pub mod chats;
pub mod customers;
pub mod notifications;
pub mod orders;
pub mod uploads;

use crate::request::RequestSpec;

/// Common paging/search parameters for list endpoints.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: u32,
    /// Free-text search filter
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 25,
            search: None,
        }
    }
}

impl ListQuery {
    /// Query for the given page with the default page size.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the search filter.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub(crate) fn apply(&self, mut spec: RequestSpec) -> RequestSpec {
        spec = spec
            .with_query("page", self.page.to_string())
            .with_query("pageSize", self.page_size.to_string());
        if let Some(search) = &self.search {
            spec = spec.with_query("search", search.clone());
        }
        spec
    }
}
