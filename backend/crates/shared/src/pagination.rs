//! `skip`/`limit` pagination shared by the list endpoints.

use serde::Deserialize;

use crate::error::app_error::{AppError, AppResult};

/// Largest page any list endpoint will return
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Raw query parameters (`?skip=&limit=`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated offset/limit pair, ready to bind into `OFFSET`/`LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub const fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Apply this page to an in-memory sequence
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl PageQuery {
    /// Resolve against the endpoint's default limit.
    ///
    /// `skip` must be non-negative and `limit` must be in `1..=MAX_PAGE_LIMIT`.
    pub fn resolve(self, default_limit: i64) -> AppResult<Page> {
        let offset = self.skip.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::bad_request("skip must not be negative"));
        }

        let limit = self.limit.unwrap_or(default_limit);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }

        Ok(Page { offset, limit })
    }
}
