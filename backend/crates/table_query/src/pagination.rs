//! Pagination envelope

use serde::{Deserialize, Serialize};

use crate::params::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(total: u64, page: PageRequest) -> Self {
        let limit = u64::from(page.limit.max(1));
        let total_pages = total.div_ceil(limit);
        Self {
            page: page.page,
            limit: page.limit,
            total,
            total_pages,
            has_next: u64::from(page.page) < total_pages,
            has_prev: page.page > 1,
        }
    }
}

/// `{ data, pagination }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PaginatedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

pub fn paginate<T>(rows: Vec<T>, total: u64, page: PageRequest) -> PaginatedResult<T> {
    PaginatedResult {
        data: rows,
        pagination: PageMeta::new(total, page),
    }
}

/// Rows to skip for a page: `(page - 1) * limit`
pub fn offset(page: PageRequest) -> u64 {
    u64::from(page.page.saturating_sub(1)) * u64::from(page.limit)
}
